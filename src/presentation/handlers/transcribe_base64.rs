use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use crate::domain::{
    AudioFormat, AudioPayload, AudioPayloadError, LanguageHint, TranscriptionOutcome,
};
use crate::presentation::state::AppState;

use super::base64_audio::decode_base64_audio;
use super::envelope::{failure_response, outcome_response};

#[derive(Debug, Deserialize)]
pub struct Base64TranscriptionRequest {
    pub audio_base64: String,
    pub audio_format: Option<String>,
    pub language: Option<String>,
}

/// `POST /transcribe-base64`: form fields `audio_base64`, `audio_format`
/// (default `webm`) and `language`.
#[tracing::instrument(skip(state, form))]
pub async fn transcribe_base64_handler(
    State(state): State<AppState>,
    form: Result<Form<Base64TranscriptionRequest>, FormRejection>,
) -> Response {
    let Form(request) = match form {
        Ok(f) => f,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected base64 transcription request");
            let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                StatusCode::PAYLOAD_TOO_LARGE
            } else {
                StatusCode::BAD_REQUEST
            };
            return failure_response(status, rejection.body_text());
        }
    };

    let data = match decode_base64_audio(&request.audio_base64) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid base64 audio");
            return failure_response(StatusCode::BAD_REQUEST, format!("Invalid base64 audio: {}", e));
        }
    };

    let format = AudioFormat::from_hint(
        request.audio_format.as_deref().unwrap_or_default(),
        AudioFormat::WEBM,
    );
    let language = LanguageHint::or_default(
        request.language.as_deref().unwrap_or_default(),
        state.endpoint_config.default_language.as_str(),
    );

    tracing::debug!(bytes = data.len(), format = %format, "Base64 audio received");

    // An empty clip is just the shortest possible one.
    let payload = match AudioPayload::new(data, format) {
        Ok(p) => p,
        Err(AudioPayloadError::Empty) => {
            return outcome_response(Ok(TranscriptionOutcome::InsufficientAudio {
                received_bytes: 0,
            }));
        }
    };

    outcome_response(
        state
            .transcription_service
            .transcribe_clip(&payload, &language)
            .await,
    )
}
