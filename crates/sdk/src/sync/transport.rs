//! HTTP transport for registry communication
//!
//! The sync client only needs "POST these JSON bytes with this bearer token
//! and hand back the status and body". The trait keeps the client testable
//! without a network; [`ReqwestTransport`] is the production implementation.

use crate::error::ConfigError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A completed HTTP exchange, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request could not be completed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    // reqwest's top-level message hides the OS cause, so keep the whole chain
    fn from(err: reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { message }
    }
}

/// Sends JSON bodies to the registry
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST `body` as `application/json` with `Authorization: Bearer <token>`
    async fn post_json(
        &self,
        url: &Url,
        bearer_token: &str,
        body: Vec<u8>,
    ) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn post_json(
        &self,
        url: &Url,
        bearer_token: &str,
        body: Vec<u8>,
    ) -> Result<TransportResponse, TransportError> {
        (**self).post_json(url, bearer_token, body).await
    }
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport; without a timeout the reqwest default applies
    pub fn new(timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &Url,
        bearer_token: &str,
        body: Vec<u8>,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .bearer_auth(bearer_token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}
