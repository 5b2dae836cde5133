use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::application::ports::{
    AudioStore, DecodingOptions, EngineOutput, StagedAudio, StagingError, TranscriptionEngine,
    TranscriptionError,
};
use crate::domain::{AudioPayload, LanguageHint, TranscriptionOutcome, TranscriptionResult};

use super::hallucination_filter::HallucinationFilter;

/// Turns one audio payload into one filtered transcript.
///
/// Every call stages exactly one temporary file and removes it before
/// returning, whatever the engine does. Engine calls are gated by a semaphore
/// so a runtime that is not reentrant can be used with a single permit.
pub struct TranscriptionService {
    engine: Arc<dyn TranscriptionEngine>,
    audio_store: Arc<dyn AudioStore>,
    filter: HallucinationFilter,
    options: DecodingOptions,
    engine_gate: Semaphore,
}

impl TranscriptionService {
    pub fn new(
        engine: Arc<dyn TranscriptionEngine>,
        audio_store: Arc<dyn AudioStore>,
        filter: HallucinationFilter,
        options: DecodingOptions,
        max_concurrent_inferences: usize,
    ) -> Self {
        Self {
            engine,
            audio_store,
            filter,
            options,
            engine_gate: Semaphore::new(max_concurrent_inferences.max(1)),
        }
    }

    /// Uploaded files are trusted to be complete, so no minimum size applies.
    pub async fn transcribe_upload(
        &self,
        payload: &AudioPayload,
        language: &LanguageHint,
    ) -> Result<TranscriptionOutcome, TranscriptionServiceError> {
        self.run(payload, language).await
    }

    /// Base64 blobs and streamed chunks must reach the minimum size, otherwise
    /// the engine is never called.
    pub async fn transcribe_clip(
        &self,
        payload: &AudioPayload,
        language: &LanguageHint,
    ) -> Result<TranscriptionOutcome, TranscriptionServiceError> {
        if !payload.meets_minimum() {
            tracing::debug!(bytes = payload.len(), "Audio clip below minimum size");
            return Ok(TranscriptionOutcome::InsufficientAudio {
                received_bytes: payload.len(),
            });
        }
        self.run(payload, language).await
    }

    pub fn model_id(&self) -> &str {
        self.engine.model_id()
    }

    pub fn device(&self) -> &str {
        self.engine.device()
    }

    /// Refuses further engine calls; callers waiting on the gate fail with
    /// `EngineUnavailable`. Calls already running finish normally.
    pub fn close(&self) {
        self.engine_gate.close();
    }

    async fn run(
        &self,
        payload: &AudioPayload,
        language: &LanguageHint,
    ) -> Result<TranscriptionOutcome, TranscriptionServiceError> {
        tracing::debug!(
            bytes = payload.len(),
            format = %payload.format(),
            language = %language,
            "Transcribing audio payload"
        );

        let staged = self.audio_store.stage(payload).await?;
        let decoded = self.decode(&staged, language).await;
        staged.release();
        let output = decoded?;

        let segment_count = output.segments.len();
        let text = self.filter.keep_speech(&output.segments);
        let result = TranscriptionResult::new(text, output.info);

        tracing::info!(
            segments = segment_count,
            chars = result.text.len(),
            language = %result.language,
            duration_secs = result.duration_seconds,
            "Audio transcription completed"
        );

        if result.text.is_empty() {
            Ok(TranscriptionOutcome::NoSpeech(result))
        } else {
            Ok(TranscriptionOutcome::Transcribed(result))
        }
    }

    async fn decode(
        &self,
        staged: &StagedAudio,
        language: &LanguageHint,
    ) -> Result<EngineOutput, TranscriptionServiceError> {
        let _permit = self
            .engine_gate
            .acquire()
            .await
            .map_err(|_| TranscriptionServiceError::EngineUnavailable)?;

        self.engine
            .transcribe(staged.path(), language, &self.options)
            .await
            .map_err(TranscriptionServiceError::Engine)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("staging: {0}")]
    Staging(#[from] StagingError),
    #[error("engine: {0}")]
    Engine(#[from] TranscriptionError),
    #[error("transcription engine is shutting down")]
    EngineUnavailable,
}
