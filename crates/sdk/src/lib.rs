//! Raistrix SDK for registering API entrypoints
//!
//! This crate provides:
//! - Entrypoint models with open JSON request/response schemas
//! - Shape validation for entrypoint drafts
//! - A sync client that buffers validated entrypoints and pushes them to the registry
//! - Environment-based client configuration
//!
//! ```no_run
//! use raistrix_sdk::{ClientConfig, EntrypointDraft, HttpMethod, SyncClient};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = SyncClient::new(ClientConfig::new("api-key", "project-id"))?;
//!
//! let draft = EntrypointDraft::new("list-users", "List all users", HttpMethod::Get, "/users")
//!     .with_schema(json!({}), json!({ "users": "array" }));
//!
//! let result = client.register_entrypoint(draft).await?;
//! println!("registered at {}", result.created_at);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod sync;
pub mod validation;

pub use crate::config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::{
    ConfigError, EntrypointField, RegistryError, Result, SyncFailure, ValidationError,
};
pub use models::*;
pub use sync::{
    EntrypointBuffer, HttpTransport, ReqwestTransport, SyncClient, SyncClientBuilder,
    TransportError, TransportResponse, ENTRYPOINTS_PATH,
};
pub use validation::{validate_entrypoint, validate_entrypoints};
