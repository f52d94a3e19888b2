use std::path::{Path, PathBuf};

use async_trait::async_trait;

use vibely_core::gate::ImplementRequest;

use crate::collaborators::HostSink;
use crate::error::HostError;

/// Base name of the file the implemented code is written to.
pub const SNIPPET_STEM: &str = "vibely_snippet";

/// Writes implemented code to `<out_dir>/vibely_snippet.<ext>`.
#[derive(Debug, Clone)]
pub struct FileHostSink {
    out_dir: PathBuf,
}

impl FileHostSink {
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    #[must_use]
    pub fn target_path(&self, request: &ImplementRequest) -> PathBuf {
        self.out_dir
            .join(format!("{SNIPPET_STEM}.{}", request.code.file_extension()))
    }
}

#[async_trait]
impl HostSink for FileHostSink {
    async fn implement(&self, request: &ImplementRequest) -> Result<Option<PathBuf>, HostError> {
        let path = self.target_path(request);
        let write_err = |source| HostError::Write {
            path: path.clone(),
            source,
        };

        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(write_err)?;
        let mut source = request.code.source().to_string();
        if !source.ends_with('\n') {
            source.push('\n');
        }
        tokio::fs::write(&path, source).await.map_err(write_err)?;

        tracing::info!(path = %path.display(), "wrote implemented code");
        Ok(Some(path))
    }
}
