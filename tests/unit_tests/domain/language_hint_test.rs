use whisper_gateway::domain::{DEFAULT_LANGUAGE, LanguageHint};

#[test]
fn given_code_when_creating_hint_then_lowercases_and_trims() {
    assert_eq!(LanguageHint::new(" NO ").as_str(), "no");
}

#[test]
fn given_blank_code_when_creating_hint_then_uses_fallback() {
    assert_eq!(LanguageHint::or_default("   ", "de").as_str(), "de");
    assert_eq!(LanguageHint::new("").as_str(), DEFAULT_LANGUAGE);
}

#[test]
fn given_default_hint_when_displayed_then_is_english() {
    assert_eq!(LanguageHint::default().to_string(), "en");
}
