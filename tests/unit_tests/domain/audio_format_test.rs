use whisper_gateway::domain::AudioFormat;

#[test]
fn given_plain_hint_when_building_format_then_uses_lowercased_extension() {
    let format = AudioFormat::from_hint("WAV", AudioFormat::WEBM);
    assert_eq!(format.extension(), "wav");
    assert_eq!(format.suffix(), ".wav");
}

#[test]
fn given_dotted_hint_when_building_format_then_strips_leading_dot() {
    let format = AudioFormat::from_hint(".mp3", AudioFormat::WEBM);
    assert_eq!(format.extension(), "mp3");
}

#[test]
fn given_path_like_hint_when_building_format_then_falls_back_to_default() {
    let format = AudioFormat::from_hint("../../etc/passwd", AudioFormat::WEBM);
    assert_eq!(format.extension(), "webm");
}

#[test]
fn given_empty_or_oversized_hint_when_building_format_then_falls_back_to_default() {
    assert_eq!(AudioFormat::from_hint("", AudioFormat::WAV).extension(), "wav");
    assert_eq!(
        AudioFormat::from_hint("averyveryverylongext", AudioFormat::WAV).extension(),
        "wav"
    );
}

#[test]
fn given_filename_with_extension_when_building_format_then_uses_it() {
    let format = AudioFormat::from_filename("recording.final.OGG", AudioFormat::WAV);
    assert_eq!(format.extension(), "ogg");
}

#[test]
fn given_filename_without_extension_when_building_format_then_uses_default() {
    assert_eq!(
        AudioFormat::from_filename("recording", AudioFormat::WAV).extension(),
        "wav"
    );
    assert_eq!(
        AudioFormat::from_filename(".hidden", AudioFormat::WAV).extension(),
        "wav"
    );
}

#[test]
fn given_default_format_when_displayed_then_is_webm() {
    assert_eq!(AudioFormat::default().to_string(), "webm");
}
