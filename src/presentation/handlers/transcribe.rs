use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;

use crate::domain::{AudioFormat, AudioPayload, LanguageHint};
use crate::presentation::state::AppState;

use super::envelope::{failure_response, outcome_response};

const AUDIO_FIELDS: [&str; 2] = ["audio", "file"];

/// `POST /transcribe`: multipart upload with an `audio` file and an optional
/// `language` field.
#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected transcription upload");
            return failure_response(rejection.status(), rejection.body_text());
        }
    };

    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut language: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return failure_response(e.status(), format!("Failed to read multipart: {}", e));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        if AUDIO_FIELDS.contains(&name.as_str()) {
            let filename = field.file_name().unwrap_or_default().to_string();
            match field.bytes().await {
                Ok(data) => upload = Some((filename, data.to_vec())),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read uploaded audio");
                    return failure_response(e.status(), format!("Failed to read file: {}", e));
                }
            }
        } else if name == "language" {
            match field.text().await {
                Ok(text) => language = Some(text),
                Err(e) => {
                    return failure_response(e.status(), format!("Failed to read language: {}", e));
                }
            }
        } else {
            tracing::debug!(field = %name, "Ignoring unknown multipart field");
        }
    }

    let Some((filename, data)) = upload else {
        tracing::warn!("Transcription request with no audio file");
        return failure_response(StatusCode::BAD_REQUEST, "No audio file uploaded");
    };

    let format = AudioFormat::from_filename(&filename, AudioFormat::WAV);
    let language = LanguageHint::or_default(
        language.as_deref().unwrap_or_default(),
        state.endpoint_config.default_language.as_str(),
    );

    tracing::debug!(filename = %filename, bytes = data.len(), format = %format, "Audio upload received");

    let payload = match AudioPayload::new(data, format) {
        Ok(p) => p,
        Err(e) => return failure_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    outcome_response(
        state
            .transcription_service
            .transcribe_upload(&payload, &language)
            .await,
    )
}
