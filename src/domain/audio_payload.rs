use super::audio_format::AudioFormat;

/// Smallest payload accepted on the base64 and streaming entry points.
/// Anything shorter cannot hold a usable utterance.
pub const MIN_AUDIO_BYTES: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioPayload {
    bytes: Vec<u8>,
    format: AudioFormat,
}

impl AudioPayload {
    pub fn new(bytes: Vec<u8>, format: AudioFormat) -> Result<Self, AudioPayloadError> {
        if bytes.is_empty() {
            return Err(AudioPayloadError::Empty);
        }
        Ok(Self { bytes, format })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn meets_minimum(&self) -> bool {
        self.bytes.len() >= MIN_AUDIO_BYTES
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AudioPayloadError {
    #[error("audio payload is empty")]
    Empty,
}
