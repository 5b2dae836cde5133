mod base64_audio;
mod envelope;
mod health;
mod stream;
mod transcribe;
mod transcribe_base64;

pub use base64_audio::decode_base64_audio;
pub use envelope::{Envelope, INSUFFICIENT_AUDIO_MESSAGE, NO_SPEECH_MESSAGE};
pub use health::health_handler;
pub use stream::{ClientFrame, SERVER_BUSY_MESSAGE, ServerFrame, parse_command, stream_handler};
pub use transcribe::transcribe_handler;
pub use transcribe_base64::transcribe_base64_handler;
