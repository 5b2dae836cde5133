use std::path::Path;

use async_trait::async_trait;

use crate::domain::{AudioInfo, LanguageHint, TranscriptSegment};

/// Decoding parameters every engine call is made with.
///
/// Each segment is decoded on its own (`condition_on_previous_text` off) at
/// zero temperature, with voice-activity gating enabled. Adapters forward what
/// their backend understands and ignore the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodingOptions {
    pub beam_size: u32,
    pub best_of: u32,
    pub temperature: f32,
    pub condition_on_previous_text: bool,
    pub vad_filter: bool,
    pub vad_min_silence_duration_ms: u32,
    pub vad_speech_pad_ms: u32,
    pub no_speech_threshold: f32,
    pub log_prob_threshold: f32,
    pub compression_ratio_threshold: f32,
    pub without_timestamps: bool,
}

impl Default for DecodingOptions {
    fn default() -> Self {
        Self {
            beam_size: 5,
            best_of: 5,
            temperature: 0.0,
            condition_on_previous_text: false,
            vad_filter: true,
            vad_min_silence_duration_ms: 500,
            vad_speech_pad_ms: 400,
            no_speech_threshold: 0.6,
            log_prob_threshold: -1.0,
            compression_ratio_threshold: 2.4,
            without_timestamps: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    pub segments: Vec<TranscriptSegment>,
    pub info: AudioInfo,
}

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &LanguageHint,
        options: &DecodingOptions,
    ) -> Result<EngineOutput, TranscriptionError>;

    fn model_id(&self) -> &str;

    fn device(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
