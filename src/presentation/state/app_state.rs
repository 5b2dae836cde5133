use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{SessionLimiter, TranscriptionService};
use crate::domain::LanguageHint;

/// Per-endpoint defaults resolved from settings at startup.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub default_language: LanguageHint,
    pub streaming_language: LanguageHint,
    pub max_upload_bytes: usize,
    pub idle_timeout: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            default_language: LanguageHint::default(),
            streaming_language: LanguageHint::default(),
            max_upload_bytes: 25 * 1024 * 1024,
            idle_timeout: Duration::from_secs(1800),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub session_limiter: SessionLimiter,
    pub endpoint_config: EndpointConfig,
}
