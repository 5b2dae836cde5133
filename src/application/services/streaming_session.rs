use std::sync::Arc;

use crate::domain::{
    AudioFormat, AudioPayload, LanguageHint, SessionEvent, SessionId, TranscriptionOutcome,
};

use super::transcription_service::TranscriptionService;

/// Inbound work for a streaming session, already decoded from the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Audio(Vec<u8>),
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Active {
        running_text: String,
    },
}

/// Per-connection transcript state.
///
/// Each audio chunk is taken to be the whole utterance so far (clients resend
/// cumulative audio), so a successful decode replaces the running text rather
/// than extending it. A `Stop` emits the running text as final and returns
/// the session to `Idle`; the same session can then start over.
pub struct StreamingSession {
    id: SessionId,
    service: Arc<TranscriptionService>,
    language: LanguageHint,
    format: AudioFormat,
    state: SessionState,
}

impl StreamingSession {
    pub fn new(service: Arc<TranscriptionService>, language: LanguageHint) -> Self {
        Self {
            id: SessionId::new(),
            service,
            language,
            format: AudioFormat::default(),
            state: SessionState::Idle,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn running_text(&self) -> &str {
        match &self.state {
            SessionState::Idle => "",
            SessionState::Active { running_text } => running_text,
        }
    }

    pub async fn handle(&mut self, command: SessionCommand) -> Option<SessionEvent> {
        match command {
            SessionCommand::Audio(bytes) => self.on_audio(bytes).await,
            SessionCommand::Stop => Some(self.on_stop()),
        }
    }

    async fn on_audio(&mut self, bytes: Vec<u8>) -> Option<SessionEvent> {
        let payload = match AudioPayload::new(bytes, self.format.clone()) {
            Ok(payload) => payload,
            Err(_) => return None,
        };

        match self.service.transcribe_clip(&payload, &self.language).await {
            Ok(TranscriptionOutcome::Transcribed(result)) => {
                self.state = SessionState::Active {
                    running_text: result.text.clone(),
                };
                Some(SessionEvent::Partial(result.text))
            }
            Ok(TranscriptionOutcome::NoSpeech(_)) => None,
            Ok(TranscriptionOutcome::InsufficientAudio { received_bytes }) => {
                tracing::trace!(
                    session_id = %self.id,
                    bytes = received_bytes,
                    "Ignoring short audio chunk"
                );
                None
            }
            Err(e) => {
                tracing::warn!(session_id = %self.id, error = %e, "Chunk transcription failed");
                None
            }
        }
    }

    fn on_stop(&mut self) -> SessionEvent {
        let text = match std::mem::take(&mut self.state) {
            SessionState::Idle => String::new(),
            SessionState::Active { running_text } => running_text,
        };
        tracing::debug!(session_id = %self.id, chars = text.len(), "Streaming session stopped");
        SessionEvent::Final(text)
    }
}
