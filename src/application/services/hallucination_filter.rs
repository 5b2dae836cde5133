use std::collections::HashSet;

use crate::domain::TranscriptSegment;

/// Phrases Whisper tends to emit over silence or music, compared after
/// trimming and lower-casing.
pub const DEFAULT_HALLUCINATION_PHRASES: &[&str] = &[
    "you",
    "thank you",
    "thanks",
    "thanks for watching",
    "bye",
    "goodbye",
    "hello",
    "hi",
    "hey",
    "okay",
    "ok",
    "subscribe",
    "like and subscribe",
    "see you",
    "thank you for watching",
    "thanks for listening",
    "music",
    "applause",
    "laughter",
];

const MIN_TEXT_CHARS: usize = 3;
const MAX_DISTINCT_TOKEN_RATIO: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct HallucinationFilter {
    phrases: HashSet<String>,
}

impl HallucinationFilter {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| normalize(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    /// Default phrase set extended with `extra` (e.g. from configuration).
    pub fn with_extra_phrases<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        filter.phrases.extend(
            extra
                .into_iter()
                .map(|p| normalize(p.as_ref()))
                .filter(|p| !p.is_empty()),
        );
        filter
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_hallucination(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return true;
        }

        let normalized = normalize(trimmed);
        if !normalized.is_empty() && self.phrases.contains(&normalized) {
            return true;
        }

        let lowered = trimmed.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().map(token_key).collect();
        if tokens.len() >= 2 {
            let distinct: HashSet<&str> = tokens.iter().copied().collect();
            if distinct.len() == 1 {
                return true;
            }
            if distinct.len() as f64 <= tokens.len() as f64 * MAX_DISTINCT_TOKEN_RATIO {
                return true;
            }
        }

        trimmed.chars().count() < MIN_TEXT_CHARS
    }

    /// Joins the segments that survive the filter, in order, with single spaces.
    pub fn keep_speech(&self, segments: &[TranscriptSegment]) -> String {
        segments
            .iter()
            .map(|segment| segment.text.trim())
            .filter(|text| {
                let drop = self.is_hallucination(text);
                if drop && !text.is_empty() {
                    tracing::debug!(segment = %text, "Dropping hallucinated segment");
                }
                !drop
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

impl Default for HallucinationFilter {
    fn default() -> Self {
        Self::new(DEFAULT_HALLUCINATION_PHRASES.iter().copied())
    }
}

/// Lower-cases and strips surrounding punctuation, so `"Thank you."` and
/// `"thank you"` compare equal.
fn normalize(text: &str) -> String {
    strip_punctuation(text.trim()).to_lowercase()
}

fn strip_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| !c.is_alphanumeric())
}

/// `"bye,"` and `"bye"` count as the same token; a token that is nothing but
/// punctuation is kept as written.
fn token_key(token: &str) -> &str {
    match strip_punctuation(token) {
        "" => token,
        stripped => stripped,
    }
}
