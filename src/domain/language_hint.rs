use std::fmt;

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageHint(String);

impl LanguageHint {
    pub fn new(code: &str) -> Self {
        Self::or_default(code, DEFAULT_LANGUAGE)
    }

    /// Blank codes resolve to `fallback`.
    pub fn or_default(code: &str, fallback: &str) -> Self {
        let code = code.trim();
        if code.is_empty() {
            Self(fallback.trim().to_ascii_lowercase())
        } else {
            Self(code.to_ascii_lowercase())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageHint {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
