use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{ArtifactSink, SinkError};

/// Sink that persists artifacts into a local directory
pub struct FsSink {
    output_dir: PathBuf,
}

impl FsSink {
    /// Create the sink, creating the output directory if needed
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

        info!("Filesystem sink initialized: {:?}", output_dir);

        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl ArtifactSink for FsSink {
    async fn deliver(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<String, SinkError> {
        let path = self.output_dir.join(filename);

        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write artifact: {:?}", path))?;

        info!(
            "Saved artifact: {:?} ({} bytes, {})",
            path,
            bytes.len(),
            content_type
        );

        Ok(path.display().to_string())
    }

    fn name(&self) -> &str {
        "fs"
    }
}
