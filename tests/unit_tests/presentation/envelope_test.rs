use serde_json::json;
use whisper_gateway::domain::{AudioInfo, TranscriptionResult};
use whisper_gateway::presentation::handlers::{Envelope, NO_SPEECH_MESSAGE};

fn result(text: &str) -> TranscriptionResult {
    TranscriptionResult::new(text.to_string(), AudioInfo::new("en", 0.5, 3.0))
}

#[test]
fn given_transcription_when_serialized_then_has_success_fields_only() {
    let body = serde_json::to_value(Envelope::transcribed(result("hello world"))).unwrap();

    assert_eq!(
        body,
        json!({
            "success": true,
            "text": "hello world",
            "language": "en",
            "duration": 3.0,
            "probability": 0.5
        })
    );
}

#[test]
fn given_no_speech_when_serialized_then_includes_message_and_empty_text() {
    let body = serde_json::to_value(Envelope::no_speech(result(""))).unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["text"], "");
    assert_eq!(body["message"], NO_SPEECH_MESSAGE);
}

#[test]
fn given_failure_when_serialized_then_has_error_only() {
    let body = serde_json::to_value(Envelope::failure("boom")).unwrap();
    assert_eq!(body, json!({"success": false, "error": "boom"}));
}
