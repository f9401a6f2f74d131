//! Error types for client configuration, validation and sync

use std::fmt;
use thiserror::Error;

/// Result type for registration operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised while building a client. No client exists after one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("project ID is required, you will find the project ID in the raistrix.com dashboard")]
    MissingProjectId,

    #[error("invalid registry endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to load configuration: {0}")]
    Load(String),

    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}

/// Entrypoint field checked by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntrypointField {
    Name,
    Description,
    Method,
    Path,
    Schema,
}

impl EntrypointField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntrypointField::Name => "name",
            EntrypointField::Description => "description",
            EntrypointField::Method => "method",
            EntrypointField::Path => "path",
            EntrypointField::Schema => "schema",
        }
    }
}

impl fmt::Display for EntrypointField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A draft failed shape validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}entrypoint {field} is required{}", index_prefix(.index), detail_suffix(.detail))]
pub struct ValidationError {
    /// Position of the failing draft within a batch
    pub index: Option<usize>,
    /// First offending field
    pub field: EntrypointField,
    /// Extra detail, e.g. the rejected method
    pub detail: Option<String>,
}

impl ValidationError {
    pub fn new(field: EntrypointField) -> Self {
        Self {
            index: None,
            field,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

fn index_prefix(index: &Option<usize>) -> String {
    index
        .map(|i| format!("entrypoint #{}: ", i))
        .unwrap_or_default()
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" {}", m))
        .unwrap_or_default()
}

/// Detail of a failed sync that was not an authentication rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncFailure {
    /// The request could not complete (DNS, connection, timeout)
    #[error("{0}")]
    Transport(String),

    /// The registry answered with a non-success status
    #[error("failed to sync entrypoints: {status} {status_text}.{}", message_suffix(.message))]
    Status {
        status: u16,
        status_text: String,
        message: Option<String>,
    },

    /// A success response carried a body that is not a sync result
    #[error("failed to parse sync response: {0}")]
    InvalidResponse(String),

    /// The buffer could not be encoded as JSON
    #[error("failed to encode sync payload: {0}")]
    Encode(String),
}

/// Errors surfaced by registration operations
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("authentication failed: your API key or project ID may have been revoked")]
    Auth { status: u16 },

    #[error("entrypoints sync failed: {0}")]
    Sync(SyncFailure),
}

impl RegistryError {
    /// Returns true if the registry rejected the credentials
    pub fn is_auth(&self) -> bool {
        matches!(self, RegistryError::Auth { .. })
    }

    /// Status code returned by the registry, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistryError::Auth { status } => Some(*status),
            RegistryError::Sync(SyncFailure::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(EntrypointField::Name);
        assert_eq!(err.to_string(), "entrypoint name is required");

        let err = ValidationError::new(EntrypointField::Method)
            .with_detail("`FETCH` is not one of GET, POST, PUT, DELETE, PATCH")
            .at_index(2);
        assert_eq!(
            err.to_string(),
            "entrypoint #2: entrypoint method is required: `FETCH` is not one of GET, POST, PUT, DELETE, PATCH"
        );
    }

    #[test]
    fn test_status_failure_display() {
        let err = RegistryError::Sync(SyncFailure::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            message: Some("boom".to_string()),
        });
        assert_eq!(
            err.to_string(),
            "entrypoints sync failed: failed to sync entrypoints: 500 Internal Server Error. boom"
        );
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_auth());

        let err = RegistryError::Sync(SyncFailure::Status {
            status: 404,
            status_text: "Not Found".to_string(),
            message: None,
        });
        assert!(err.to_string().ends_with("404 Not Found."));
    }

    #[test]
    fn test_sync_failure_messages() {
        let err = RegistryError::Sync(SyncFailure::Transport("connection reset".to_string()));
        assert_eq!(err.to_string(), "entrypoints sync failed: connection reset");
        assert_eq!(
            SyncFailure::Encode("bad".to_string()).to_string(),
            "failed to encode sync payload: bad"
        );
    }

    #[test]
    fn test_auth_error_hides_status() {
        let err = RegistryError::Auth { status: 403 };
        assert!(err.is_auth());
        assert!(err.to_string().starts_with("authentication failed"));
        assert!(!err.to_string().contains("403"));
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::MissingApiKey.to_string(), "API key is required");
        assert!(ConfigError::MissingProjectId
            .to_string()
            .starts_with("project ID is required"));
    }
}
