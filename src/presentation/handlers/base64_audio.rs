use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Decodes base64 audio, accepting a `data:<mime>;base64,` prefix and
/// embedded whitespace as browsers tend to send them.
pub fn decode_base64_audio(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let body = match encoded.trim().strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, data)| data).unwrap_or(rest),
        None => encoded.trim(),
    };

    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact)
}
