use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::TranscriptionError;
use crate::application::services::TranscriptionServiceError;
use crate::domain::{TranscriptionOutcome, TranscriptionResult};
use crate::infrastructure::observability::transcript_preview;

pub const INSUFFICIENT_AUDIO_MESSAGE: &str = "Audio too short - speak for at least 2 seconds";
pub const NO_SPEECH_MESSAGE: &str = "No speech detected - speak clearly";

/// Uniform response body: `{success: true, ...}` or `{success: false, error}`.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn transcribed(result: TranscriptionResult) -> Self {
        Self {
            success: true,
            text: Some(result.text),
            language: Some(result.language),
            duration: Some(result.duration_seconds),
            probability: Some(result.language_probability),
            message: None,
            error: None,
        }
    }

    pub fn no_speech(result: TranscriptionResult) -> Self {
        Self {
            message: Some(NO_SPEECH_MESSAGE.to_string()),
            ..Self::transcribed(result)
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: None,
            language: None,
            duration: None,
            probability: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

pub fn failure_response(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(Envelope::failure(error))).into_response()
}

pub fn outcome_response(
    outcome: Result<TranscriptionOutcome, TranscriptionServiceError>,
) -> Response {
    match outcome {
        Ok(TranscriptionOutcome::Transcribed(result)) => {
            tracing::info!(
                text = %transcript_preview(&result.text),
                duration_secs = result.duration_seconds,
                "Transcription succeeded"
            );
            (StatusCode::OK, Json(Envelope::transcribed(result))).into_response()
        }
        Ok(TranscriptionOutcome::NoSpeech(result)) => {
            tracing::info!(duration_secs = result.duration_seconds, "No speech detected");
            (StatusCode::OK, Json(Envelope::no_speech(result))).into_response()
        }
        Ok(TranscriptionOutcome::InsufficientAudio { received_bytes }) => {
            tracing::info!(bytes = received_bytes, "Audio too short to transcribe");
            failure_response(StatusCode::OK, INSUFFICIENT_AUDIO_MESSAGE)
        }
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            failure_response(error_status(&e), e.to_string())
        }
    }
}

fn error_status(error: &TranscriptionServiceError) -> StatusCode {
    match error {
        TranscriptionServiceError::Engine(
            TranscriptionError::DecodingFailed(_) | TranscriptionError::UnsupportedFormat(_),
        ) => StatusCode::UNPROCESSABLE_ENTITY,
        TranscriptionServiceError::EngineUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
