//! Client configuration

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Default registry host
pub const DEFAULT_ENDPOINT: &str = "https://raistrix.com";

/// Prefix of the environment variables read by [`ClientConfig::from_env`]
const ENV_PREFIX: &str = "RAISTRIX";

/// Credentials and registry location for a [`SyncClient`](crate::SyncClient)
///
/// Values are not checked here; the client checks them when it is built.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Bearer credential sent with every sync
    pub api_key: String,
    /// Project the entrypoints belong to
    pub project_id: String,
    /// Registry base URL
    pub endpoint: String,
    /// Request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
        }
    }

    /// Point the client at a different registry host
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load configuration from `RAISTRIX_*` environment variables
    ///
    /// Reads `RAISTRIX_API_KEY`, `RAISTRIX_PROJECT_ID`, `RAISTRIX_ENDPOINT`
    /// and `RAISTRIX_REQUEST_TIMEOUT_SECS`. Missing credentials load as empty
    /// strings and are rejected when the client is built.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    // Credentials keep their exact text, e.g. `007`
    fn from_environment(source: config::Environment) -> Result<Self, ConfigError> {
        let raw: RawConfig = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(raw.into())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ClientConfig")
            .field("api_key", &api_key)
            .field("project_id", &self.project_id)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Shape of the environment source before defaults are applied
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    project_id: String,
    #[serde(default = "default_endpoint")]
    endpoint: String,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl From<RawConfig> for ClientConfig {
    fn from(raw: RawConfig) -> Self {
        Self {
            api_key: raw.api_key,
            project_id: raw.project_id,
            endpoint: raw.endpoint,
            request_timeout: raw.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_source(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_new_uses_default_endpoint() {
        let config = ClientConfig::new("k", "p");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("k", "p")
            .with_endpoint("http://localhost:9000")
            .with_request_timeout(Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://localhost:9000");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_load_from_environment() {
        let config = ClientConfig::from_environment(env_source(&[
            ("RAISTRIX_API_KEY", "secret"),
            ("RAISTRIX_PROJECT_ID", "proj-1"),
            ("RAISTRIX_ENDPOINT", "https://registry.internal"),
            ("RAISTRIX_REQUEST_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.project_id, "proj-1");
        assert_eq!(config.endpoint, "https://registry.internal");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_load_with_missing_values() {
        let config = ClientConfig::from_environment(env_source(&[])).unwrap();
        assert!(config.api_key.is_empty());
        assert!(config.project_id.is_empty());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_numeric_looking_credentials_keep_their_text() {
        let config = ClientConfig::from_environment(env_source(&[
            ("RAISTRIX_API_KEY", "1e5"),
            ("RAISTRIX_PROJECT_ID", "007"),
            ("RAISTRIX_REQUEST_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "1e5");
        assert_eq!(config.project_id, "007");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_timeout_is_load_error() {
        let err = ClientConfig::from_environment(env_source(&[(
            "RAISTRIX_REQUEST_TIMEOUT_SECS",
            "soon",
        )]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = ClientConfig::new("super-secret", "proj-1");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("proj-1"));
    }
}
