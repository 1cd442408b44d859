/// Subtitle entries and the per-track subtitle mapping
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Subtitles keyed by track-local key (explicit key, original filename or derived filename)
pub type SubtitlesJson = HashMap<String, Vec<Subtitle>>;

/// One timed caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtitle {
    /// Start of the caption in seconds (inclusive)
    pub start: f64,

    /// End of the caption in seconds (exclusive)
    pub end: f64,

    /// Caption text
    pub text: String,

    /// Locale tag (e.g. "en"); untagged entries match every locale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Subtitle {
    /// Create an untagged caption
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            locale: None,
        }
    }

    /// Tag the caption with a locale
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Whether `time` falls inside `[start, end)`
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_half_open() {
        let sub = Subtitle::new(0.0, 5.0, "hi");
        assert!(sub.contains(0.0));
        assert!(sub.contains(4.999));
        assert!(!sub.contains(5.0));
        assert!(!sub.contains(-0.1));
    }

    #[test]
    fn deserializes_without_locale() {
        let json = r#"{"intro.mp3": [{"start": 0, "end": 5, "text": "hi"}]}"#;
        let subtitles: SubtitlesJson = serde_json::from_str(json).unwrap();

        let entries = &subtitles["intro.mp3"];
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "hi");
        assert_eq!(entries[0].locale, None);
    }
}
