use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::application::services::{SessionCommand, StreamingSession};
use crate::domain::SessionEvent;
use crate::presentation::state::AppState;

use super::base64_audio::decode_base64_audio;

pub const SERVER_BUSY_MESSAGE: &str = "Server busy - too many concurrent transcription sessions";

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientFrame {
    Audio { audio: String },
    Stop,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerFrame {
    Partial { text: String },
    Final { text: String },
    Error { message: String },
}

impl From<SessionEvent> for ServerFrame {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::Partial(text) => ServerFrame::Partial { text },
            SessionEvent::Final(text) => ServerFrame::Final { text },
        }
    }
}

/// `GET /ws/transcribe`
pub async fn stream_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let Some(_permit) = state.session_limiter.try_acquire() else {
        tracing::warn!(
            max_sessions = state.session_limiter.capacity(),
            "Rejecting streaming session: limit reached"
        );
        let _ = send_frame(
            &mut socket,
            &ServerFrame::Error {
                message: SERVER_BUSY_MESSAGE.to_string(),
            },
        )
        .await;
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::AGAIN,
                reason: "server busy".into(),
            })))
            .await;
        return;
    };

    let mut session = StreamingSession::new(
        Arc::clone(&state.transcription_service),
        state.endpoint_config.streaming_language.clone(),
    );
    let span = tracing::info_span!("stream_session", session_id = %session.id());

    run_session(&mut socket, &mut session, &state)
        .instrument(span)
        .await;
}

async fn run_session(socket: &mut WebSocket, session: &mut StreamingSession, state: &AppState) {
    let idle_timeout = state.endpoint_config.idle_timeout;
    tracing::info!(active_sessions = state.session_limiter.active(), "WebSocket connected");

    loop {
        let message = match tokio::time::timeout(idle_timeout, socket.recv()).await {
            Err(_) => {
                tracing::info!(timeout_secs = idle_timeout.as_secs(), "Closing idle session");
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
            Ok(None) => break,
            Ok(Some(Err(e))) => {
                tracing::debug!(error = %e, "WebSocket receive failed");
                break;
            }
            Ok(Some(Ok(message))) => message,
        };

        let command = match message {
            Message::Text(text) => match parse_command(text.as_str()) {
                Some(command) => command,
                None => continue,
            },
            Message::Close(_) => break,
            _ => continue,
        };

        if let Some(event) = session.handle(command).await {
            if send_frame(socket, &ServerFrame::from(event)).await.is_err() {
                break;
            }
        }
    }

    tracing::info!("WebSocket disconnected");
}

/// Malformed frames are logged and skipped; they never end the session.
pub fn parse_command(raw: &str) -> Option<SessionCommand> {
    let frame: ClientFrame = match serde_json::from_str(raw) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unrecognised frame");
            return None;
        }
    };

    match frame {
        ClientFrame::Audio { audio } => match decode_base64_audio(&audio) {
            Ok(bytes) => Some(SessionCommand::Audio(bytes)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring audio frame with invalid base64");
                None
            }
        },
        ClientFrame::Stop => Some(SessionCommand::Stop),
    }
}

async fn send_frame(socket: &mut WebSocket, frame: &ServerFrame) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize frame");
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}
