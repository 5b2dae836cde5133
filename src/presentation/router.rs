use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, stream_handler, transcribe_base64_handler, transcribe_handler,
};
use crate::presentation::state::AppState;

// Room for the form field name and url-encoding around the base64 text.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = state.endpoint_config.max_upload_bytes;
    let base64_limit = base64_body_limit(upload_limit);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/transcribe",
            post(transcribe_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/transcribe-base64",
            post(transcribe_base64_handler).layer(DefaultBodyLimit::max(base64_limit)),
        )
        .route("/ws/transcribe", get(stream_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

/// Base64 inflates by 4/3 and url-encoding may escape `+`, `/` and `=`.
fn base64_body_limit(raw_limit: usize) -> usize {
    raw_limit
        .saturating_mul(2)
        .saturating_add(FORM_OVERHEAD_BYTES)
}
