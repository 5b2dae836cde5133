use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{
    DecodingOptions, EngineOutput, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{AudioInfo, LanguageHint, TranscriptSegment};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "whisper-1";

/// Client for an OpenAI-compatible `/audio/transcriptions` endpoint.
///
/// Besides the standard fields it sends the beam and VAD parameters that
/// faster-whisper based servers accept; servers that do not know them ignore
/// extra form fields.
pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    fn form(
        &self,
        file_part: multipart::Part,
        language: &LanguageHint,
        options: &DecodingOptions,
    ) -> multipart::Form {
        multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", language.as_str().to_string())
            .text("response_format", "verbose_json")
            .text("temperature", options.temperature.to_string())
            .text("beam_size", options.beam_size.to_string())
            .text("best_of", options.best_of.to_string())
            .text(
                "condition_on_previous_text",
                options.condition_on_previous_text.to_string(),
            )
            .text("vad_filter", options.vad_filter.to_string())
            .text(
                "vad_parameters",
                format!(
                    r#"{{"min_silence_duration_ms":{},"speech_pad_ms":{}}}"#,
                    options.vad_min_silence_duration_ms, options.vad_speech_pad_ms
                ),
            )
            .text("no_speech_threshold", options.no_speech_threshold.to_string())
            .text("log_prob_threshold", options.log_prob_threshold.to_string())
            .text(
                "compression_ratio_threshold",
                options.compression_ratio_threshold.to_string(),
            )
            .text("without_timestamps", options.without_timestamps.to_string())
            .part("file", file_part)
    }
}

#[derive(Deserialize)]
struct VerboseTranscription {
    #[serde(default)]
    text: String,
    language: Option<String>,
    language_probability: Option<f32>,
    duration: Option<f32>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
}

#[derive(Deserialize)]
struct VerboseSegment {
    text: String,
    start: Option<f32>,
    end: Option<f32>,
}

impl VerboseTranscription {
    fn into_output(self, language: &LanguageHint) -> EngineOutput {
        let segments = if self.segments.is_empty() {
            vec![TranscriptSegment::new(self.text)]
        } else {
            self.segments
                .into_iter()
                .map(|s| TranscriptSegment {
                    text: s.text,
                    start_seconds: s.start,
                    end_seconds: s.end,
                })
                .collect()
        };

        EngineOutput {
            segments,
            info: AudioInfo::new(
                self.language
                    .unwrap_or_else(|| language.as_str().to_string()),
                self.language_probability.unwrap_or(1.0),
                self.duration.unwrap_or(0.0),
            ),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &LanguageHint,
        options: &DecodingOptions,
    ) -> Result<EngineOutput, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let audio_data = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TranscriptionError::DecodingFailed(format!("read audio: {}", e)))?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        tracing::debug!(model = %self.model, "Sending audio to Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(self.form(file_part, language, options))
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcription: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse response: {}", e)))?;

        tracing::debug!(
            segments = transcription.segments.len(),
            "Whisper API transcription completed"
        );

        Ok(transcription.into_output(language))
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn device(&self) -> &str {
        "remote"
    }
}
