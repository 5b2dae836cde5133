use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::infrastructure::audio::{CandleWhisperEngine, OpenAiWhisperEngine};

use super::settings::{TranscriptionProviderSetting, TranscriptionSettings};

pub const DEFAULT_LOCAL_MODEL: &str = "openai/whisper-medium";

impl TranscriptionSettings {
    /// The configured model, ignoring blank values.
    pub fn configured_model(&self) -> Option<&str> {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|model| !model.is_empty())
    }

    pub fn local_model(&self) -> &str {
        self.configured_model().unwrap_or(DEFAULT_LOCAL_MODEL)
    }

    /// Loads the engine for the configured provider. The local engine
    /// downloads weights on first use.
    pub fn build_engine(&self) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match self.provider {
            TranscriptionProviderSetting::Local => {
                let engine = CandleWhisperEngine::new(self.local_model(), &self.device)?;
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::OpenAi => {
                let key = self
                    .api_key
                    .clone()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| {
                        TranscriptionError::ModelLoadFailed(
                            "transcription.api_key is required for the openai provider"
                                .to_string(),
                        )
                    })?;
                let engine = OpenAiWhisperEngine::new(
                    key,
                    self.base_url.clone(),
                    self.configured_model().map(str::to_string),
                );
                Ok(Arc::new(engine))
            }
        }
    }
}
