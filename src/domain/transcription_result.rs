/// Metadata reported by the engine for one decoded file.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInfo {
    pub language: String,
    pub language_probability: f32,
    pub duration_seconds: f32,
}

impl AudioInfo {
    pub fn new(
        language: impl Into<String>,
        language_probability: f32,
        duration_seconds: f32,
    ) -> Self {
        Self {
            language: language.into(),
            language_probability: language_probability.clamp(0.0, 1.0),
            duration_seconds: duration_seconds.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    pub text: String,
    pub language: String,
    pub language_probability: f32,
    pub duration_seconds: f32,
}

impl TranscriptionResult {
    pub fn new(text: String, info: AudioInfo) -> Self {
        Self {
            text,
            language: info.language,
            language_probability: info.language_probability,
            duration_seconds: info.duration_seconds,
        }
    }
}

/// What a transcription request produced, short of an outright failure.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionOutcome {
    Transcribed(TranscriptionResult),
    /// The engine ran but every segment was empty or filtered out.
    NoSpeech(TranscriptionResult),
    /// Rejected before staging; the engine was never called.
    InsufficientAudio { received_bytes: usize },
}

impl TranscriptionOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Transcribed(result) | Self::NoSpeech(result) => Some(&result.text),
            Self::InsufficientAudio { .. } => None,
        }
    }
}
