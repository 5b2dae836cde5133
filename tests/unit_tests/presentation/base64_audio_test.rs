use whisper_gateway::presentation::handlers::decode_base64_audio;

#[test]
fn given_plain_base64_when_decoding_then_returns_bytes() {
    assert_eq!(decode_base64_audio("AAEC").unwrap(), vec![0, 1, 2]);
}

#[test]
fn given_data_url_when_decoding_then_strips_prefix() {
    let decoded = decode_base64_audio("data:audio/webm;codecs=opus;base64,AAEC").unwrap();
    assert_eq!(decoded, vec![0, 1, 2]);
}

#[test]
fn given_base64_with_line_breaks_when_decoding_then_ignores_whitespace() {
    assert_eq!(decode_base64_audio(" AA\nEC \r\n").unwrap(), vec![0, 1, 2]);
}

#[test]
fn given_invalid_base64_when_decoding_then_returns_error() {
    assert!(decode_base64_audio("not base64!").is_err());
}
