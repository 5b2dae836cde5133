#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    pub start_seconds: Option<f32>,
    pub end_seconds: Option<f32>,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_seconds: None,
            end_seconds: None,
        }
    }

    pub fn timed(text: impl Into<String>, start_seconds: f32, end_seconds: f32) -> Self {
        Self {
            text: text.into(),
            start_seconds: Some(start_seconds),
            end_seconds: Some(end_seconds),
        }
    }
}
