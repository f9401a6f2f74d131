//! Sync client for the Raistrix registry
//!
//! The client validates entrypoint drafts, appends them to its buffer and
//! pushes the entire buffer to the registry on every registration call:
//! - One POST per call, no retries
//! - The buffer is appended before the request, so a failed sync keeps it
//! - 401/403 map to an authentication error, everything else to a sync error

use super::buffer::EntrypointBuffer;
use super::transport::{HttpTransport, ReqwestTransport};
use crate::config::ClientConfig;
use crate::error::{ConfigError, RegistryError, Result, SyncFailure};
use crate::models::{EntrypointDescriptor, EntrypointDraft, SyncResult};
use crate::validation::{validate_entrypoint, validate_entrypoints};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Registry path receiving entrypoint syncs
pub const ENTRYPOINTS_PATH: &str = "/api/v1/entrypoints/";

/// Body of a sync request
#[derive(Serialize)]
struct SyncPayload<'a> {
    #[serde(rename = "projectId")]
    project_id: &'a str,
    entrypoints: &'a [EntrypointDescriptor],
}

/// Error body returned by the registry, parsed best effort
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client that buffers validated entrypoints and syncs them to the registry
pub struct SyncClient<T: HttpTransport = ReqwestTransport> {
    config: ClientConfig,
    entrypoints_url: Url,
    transport: T,
    buffer: EntrypointBuffer,
}

impl SyncClient<ReqwestTransport> {
    /// Create a client backed by reqwest
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        check_credentials(&config)?;
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Self::with_transport(config, transport)
    }

    pub fn builder() -> SyncClientBuilder {
        SyncClientBuilder::new()
    }
}

impl<T: HttpTransport> SyncClient<T> {
    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> std::result::Result<Self, ConfigError> {
        check_credentials(&config)?;
        let entrypoints_url = entrypoints_url(&config.endpoint)?;

        Ok(Self {
            config,
            entrypoints_url,
            transport,
            buffer: EntrypointBuffer::new(),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    /// Full URL syncs are posted to
    pub fn entrypoints_url(&self) -> &Url {
        &self.entrypoints_url
    }

    /// Every entrypoint accepted so far, in registration order
    pub fn entrypoints(&self) -> &[EntrypointDescriptor] {
        self.buffer.as_slice()
    }

    pub fn buffer(&self) -> &EntrypointBuffer {
        &self.buffer
    }

    /// Register a single entrypoint and sync the buffer
    pub async fn register_entrypoint(
        &mut self,
        entrypoint: impl Into<EntrypointDraft>,
    ) -> Result<SyncResult> {
        let descriptor = validate_entrypoint(&entrypoint.into())?;

        debug!(name = %descriptor.name, method = %descriptor.method, path = %descriptor.path, "Entrypoint buffered");
        self.buffer.push(descriptor);

        self.sync().await
    }

    /// Register a batch and sync the buffer once
    ///
    /// If any draft is invalid nothing is buffered and no request is made.
    pub async fn register_entrypoints<I>(&mut self, entrypoints: I) -> Result<SyncResult>
    where
        I: IntoIterator,
        I::Item: Into<EntrypointDraft>,
    {
        let drafts: Vec<EntrypointDraft> = entrypoints.into_iter().map(Into::into).collect();
        let descriptors = validate_entrypoints(&drafts)?;

        debug!(count = descriptors.len(), "Entrypoints buffered");
        self.buffer.extend(descriptors);

        self.sync().await
    }

    /// Push the whole buffer to the registry
    async fn sync(&self) -> Result<SyncResult> {
        let payload = SyncPayload {
            project_id: &self.config.project_id,
            entrypoints: self.buffer.as_slice(),
        };
        let body = serde_json::to_vec(&payload)
            .map_err(|e| RegistryError::Sync(SyncFailure::Encode(e.to_string())))?;

        let response = self
            .transport
            .post_json(&self.entrypoints_url, &self.config.api_key, body)
            .await
            .map_err(|e| RegistryError::Sync(SyncFailure::Transport(e.to_string())))?;

        if !response.is_success() {
            if response.status == 401 || response.status == 403 {
                return Err(RegistryError::Auth {
                    status: response.status,
                });
            }

            let message = serde_json::from_slice::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.message);

            return Err(RegistryError::Sync(SyncFailure::Status {
                status: response.status,
                status_text: response.status_text,
                message,
            }));
        }

        let result: SyncResult = serde_json::from_slice(&response.body)
            .map_err(|e| RegistryError::Sync(SyncFailure::InvalidResponse(e.to_string())))?;

        let count = self.buffer.len();
        info!(
            count,
            project_id = %self.config.project_id,
            "{} entrypoint(s) synced to {}",
            count,
            self.entrypoints_url.host_str().unwrap_or("registry")
        );

        Ok(result)
    }
}

impl<T: HttpTransport> fmt::Debug for SyncClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncClient")
            .field("project_id", &self.config.project_id)
            .field("entrypoints_url", &self.entrypoints_url.as_str())
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

/// API key first, then project ID
fn check_credentials(config: &ClientConfig) -> std::result::Result<(), ConfigError> {
    if config.api_key.is_empty() {
        return Err(ConfigError::MissingApiKey);
    }
    if config.project_id.is_empty() {
        return Err(ConfigError::MissingProjectId);
    }
    Ok(())
}

fn entrypoints_url(endpoint: &str) -> std::result::Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let base = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", base.scheme())));
    }

    base.join(ENTRYPOINTS_PATH).map_err(|e| invalid(e.to_string()))
}

/// Builder for SyncClient configuration
#[derive(Debug, Default)]
pub struct SyncClientBuilder {
    api_key: Option<String>,
    project_id: Option<String>,
    endpoint: Option<String>,
    request_timeout: Option<Duration>,
}

impl SyncClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    fn into_config(self) -> ClientConfig {
        let mut config = ClientConfig::new(
            self.api_key.unwrap_or_default(),
            self.project_id.unwrap_or_default(),
        );
        if let Some(endpoint) = self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        config.request_timeout = self.request_timeout;
        config
    }

    pub fn build(self) -> std::result::Result<SyncClient, ConfigError> {
        SyncClient::new(self.into_config())
    }

    pub fn build_with_transport<T: HttpTransport>(
        self,
        transport: T,
    ) -> std::result::Result<SyncClient<T>, ConfigError> {
        SyncClient::with_transport(self.into_config(), transport)
    }
}
