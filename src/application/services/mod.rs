mod hallucination_filter;
mod session_limiter;
mod streaming_session;
mod transcription_service;

pub use hallucination_filter::{DEFAULT_HALLUCINATION_PHRASES, HallucinationFilter};
pub use session_limiter::{SessionLimiter, SessionPermit};
pub use streaming_session::{SessionCommand, SessionState, StreamingSession};
pub use transcription_service::{TranscriptionService, TranscriptionServiceError};
