use std::io;
use std::path::Path;

use async_trait::async_trait;
use tempfile::TempPath;

use crate::domain::AudioPayload;

/// Materializes payloads as files the engine can open.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn stage(&self, payload: &AudioPayload) -> Result<StagedAudio, StagingError>;
}

/// A staged audio file that is removed when released or dropped.
///
/// Removal errors are logged and swallowed so they never mask the result of
/// the operation that used the file.
#[derive(Debug)]
pub struct StagedAudio {
    path: Option<TempPath>,
}

impl StagedAudio {
    pub fn new(path: TempPath) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> &Path {
        match &self.path {
            Some(path) => &**path,
            None => Path::new(""),
        }
    }

    pub fn release(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        let staged_path = path.to_path_buf();
        match path.close() {
            Ok(()) => tracing::trace!(path = %staged_path.display(), "Staged audio removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %staged_path.display(),
                    "Failed to remove staged audio file"
                );
            }
        }
    }
}

impl Drop for StagedAudio {
    fn drop(&mut self) {
        self.remove();
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("staging directory unavailable: {0}")]
    DirectoryUnavailable(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
