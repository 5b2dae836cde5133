use whisper_gateway::application::services::{DEFAULT_HALLUCINATION_PHRASES, HallucinationFilter};
use whisper_gateway::domain::TranscriptSegment;

fn segments(texts: &[&str]) -> Vec<TranscriptSegment> {
    texts.iter().map(|t| TranscriptSegment::new(*t)).collect()
}

#[test]
fn given_every_default_phrase_in_any_case_when_checked_then_is_hallucination() {
    let filter = HallucinationFilter::default();

    for phrase in DEFAULT_HALLUCINATION_PHRASES {
        assert!(filter.is_hallucination(phrase), "{phrase}");
        assert!(filter.is_hallucination(&phrase.to_uppercase()), "{phrase}");
        assert!(filter.is_hallucination(&format!("  {phrase}\t")), "{phrase}");
    }
}

#[test]
fn given_phrase_with_trailing_punctuation_when_checked_then_is_hallucination() {
    let filter = HallucinationFilter::default();
    assert!(filter.is_hallucination("Thank you."));
    assert!(filter.is_hallucination("Thanks for watching!"));
}

#[test]
fn given_empty_or_whitespace_text_when_checked_then_is_hallucination() {
    let filter = HallucinationFilter::default();
    assert!(filter.is_hallucination(""));
    assert!(filter.is_hallucination("   \n"));
}

#[test]
fn given_punctuation_only_text_when_checked_then_only_length_and_repetition_apply() {
    let filter = HallucinationFilter::new(Vec::<String>::new());

    assert!(!filter.is_hallucination("..."));
    assert!(!filter.is_hallucination("?!?"));
    assert!(!filter.is_hallucination("♪♪♪"));
    assert!(filter.is_hallucination("?!"));
    assert!(filter.is_hallucination("- -"));
}

#[test]
fn given_repeated_word_with_trailing_punctuation_when_checked_then_is_hallucination() {
    let filter = HallucinationFilter::new(Vec::<String>::new());
    assert!(filter.is_hallucination("Bye, bye."));
}

#[test]
fn given_text_shorter_than_three_chars_when_checked_then_is_hallucination() {
    let filter = HallucinationFilter::new(Vec::<String>::new());
    assert!(filter.is_hallucination("ja"));
    assert!(filter.is_hallucination("x"));
}

#[test]
fn given_repeated_single_token_when_checked_then_is_hallucination() {
    let filter = HallucinationFilter::default();
    assert!(filter.is_hallucination("Ychwanegwch ychwanegwch"));
    assert!(filter.is_hallucination("la la la la"));
}

#[test]
fn given_text_dominated_by_few_tokens_when_checked_then_is_hallucination() {
    let filter = HallucinationFilter::default();
    let text = "na na na na na na na na na hey";
    assert!(filter.is_hallucination(text));
}

#[test]
fn given_distinct_tokens_when_checked_then_is_not_hallucination() {
    let filter = HallucinationFilter::default();
    assert!(!filter.is_hallucination("hello world"));
    assert!(!filter.is_hallucination("the quick brown fox jumps"));
}

#[test]
fn given_extra_phrase_when_filter_built_then_phrase_is_filtered() {
    let filter = HallucinationFilter::with_extra_phrases(["Teksting av Nicolai Winther"]);

    assert_eq!(filter.phrase_count(), DEFAULT_HALLUCINATION_PHRASES.len() + 1);
    assert!(filter.is_hallucination("teksting av nicolai winther"));
    assert!(filter.is_hallucination("thank you"));
}

#[test]
fn given_mixed_segments_when_keeping_speech_then_joins_survivors_in_order() {
    let filter = HallucinationFilter::default();
    let text = filter.keep_speech(&segments(&[
        "  The quick brown fox. ",
        "Thank you.",
        "",
        "jumps over the dog",
    ]));

    assert_eq!(text, "The quick brown fox. jumps over the dog");
}

#[test]
fn given_only_hallucinated_segments_when_keeping_speech_then_returns_empty() {
    let filter = HallucinationFilter::default();
    let text = filter.keep_speech(&segments(&["Music", "you", "bye bye"]));
    assert!(text.is_empty());
}
