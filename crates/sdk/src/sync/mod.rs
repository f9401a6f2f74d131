//! Synchronization with the Raistrix registry
//!
//! This module provides:
//! - An append-only buffer of validated entrypoints
//! - A transport abstraction with a reqwest implementation
//! - The sync client that validates, buffers and pushes entrypoints

mod buffer;
mod client;
mod transport;


pub use buffer::EntrypointBuffer;
pub use client::{SyncClient, SyncClientBuilder, ENTRYPOINTS_PATH};
pub use transport::{HttpTransport, ReqwestTransport, TransportError, TransportResponse};
