use std::fmt;

const MAX_EXTENSION_LEN: usize = 10;

/// Container hint for a staged audio payload, stored as a bare file extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioFormat(String);

impl AudioFormat {
    pub const WEBM: &'static str = "webm";
    pub const WAV: &'static str = "wav";

    /// Builds a format from a client-supplied tag such as `"webm"` or `".mp3"`.
    /// Tags that cannot be used safely as a file suffix fall back to `default`.
    pub fn from_hint(hint: &str, default: &str) -> Self {
        let candidate = hint.trim().trim_start_matches('.').to_ascii_lowercase();
        if is_safe_extension(&candidate) {
            Self(candidate)
        } else {
            Self(default.to_string())
        }
    }

    pub fn from_filename(filename: &str, default: &str) -> Self {
        match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Self::from_hint(ext, default),
            _ => Self(default.to_string()),
        }
    }

    pub fn extension(&self) -> &str {
        &self.0
    }

    pub fn suffix(&self) -> String {
        format!(".{}", self.0)
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self(Self::WEBM.to_string())
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_safe_extension(ext: &str) -> bool {
    !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
}
