use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::{AudioStore, StagedAudio, StagingError};
use crate::domain::AudioPayload;

const FILE_PREFIX: &str = "audio-";

/// Stages payloads as uniquely named files under a local directory.
pub struct TempAudioStore {
    base_path: PathBuf,
}

impl TempAudioStore {
    pub fn new(base_path: PathBuf) -> Result<Self, StagingError> {
        std::fs::create_dir_all(&base_path).map_err(|e| {
            StagingError::DirectoryUnavailable(format!("{}: {}", base_path.display(), e))
        })?;
        Ok(Self { base_path })
    }

    /// Uses the operating system's temp directory.
    pub fn in_system_temp() -> Result<Self, StagingError> {
        Self::new(std::env::temp_dir())
    }
}

#[async_trait]
impl AudioStore for TempAudioStore {
    async fn stage(&self, payload: &AudioPayload) -> Result<StagedAudio, StagingError> {
        let base_path = self.base_path.clone();
        let suffix = payload.format().suffix();
        let bytes = payload.bytes().to_vec();

        let path = tokio::task::spawn_blocking(move || {
            let mut file = tempfile::Builder::new()
                .prefix(FILE_PREFIX)
                .suffix(&suffix)
                .tempfile_in(&base_path)?;
            file.write_all(&bytes)?;
            file.flush()?;
            Ok::<_, std::io::Error>(file.into_temp_path())
        })
        .await
        .map_err(|e| StagingError::WriteFailed(format!("staging task: {}", e)))??;

        tracing::trace!(path = %path.display(), bytes = payload.len(), "Audio staged");

        Ok(StagedAudio::new(path))
    }
}
