//! Artifact delivery boundary
//!
//! The capture core hands `(bytes, filename, content_type)` to an
//! `ArtifactSink` and never concerns itself with how the sink persists or
//! transmits them. Blocking or async I/O, retries, and cancellation all
//! live behind this trait.

mod fs;

pub use fs::FsSink;

use async_trait::async_trait;
use thiserror::Error;

/// Opaque failure from an artifact sink.
///
/// The core surfaces it to its own caller unchanged; retry policy, if any,
/// belongs to the sink or its caller.
#[derive(Debug, Error)]
#[error("artifact delivery failed: {0}")]
pub struct SinkError(pub anyhow::Error);

impl From<anyhow::Error> for SinkError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

/// Destination for finished artifacts
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Deliver one artifact. Returns an implementation-defined location
    /// (path, URL, ...) on success.
    async fn deliver(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<String, SinkError>;

    /// Sink name for logging
    fn name(&self) -> &str;
}
