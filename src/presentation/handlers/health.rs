use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub device: String,
    pub active_sessions: usize,
    pub max_sessions: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            model: state.transcription_service.model_id().to_string(),
            device: state.transcription_service.device().to_string(),
            active_sessions: state.session_limiter.active(),
            max_sessions: state.session_limiter.capacity(),
        }),
    )
}
