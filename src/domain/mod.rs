mod audio_format;
mod audio_payload;
mod language_hint;
mod session_event;
mod session_id;
mod transcript_segment;
mod transcription_result;

pub use audio_format::AudioFormat;
pub use audio_payload::{AudioPayload, AudioPayloadError, MIN_AUDIO_BYTES};
pub use language_hint::{DEFAULT_LANGUAGE, LanguageHint};
pub use session_event::SessionEvent;
pub use session_id::SessionId;
pub use transcript_segment::TranscriptSegment;
pub use transcription_result::{AudioInfo, TranscriptionOutcome, TranscriptionResult};
