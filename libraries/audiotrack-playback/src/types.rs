//! Request and update types for track operations

use audiotrack_core::{AudioOptions, CoreError, Subtitle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Caller hooks fired from an item's lifecycle events
#[derive(Default)]
pub struct AudioCallbacks {
    /// First start of the item only
    pub on_play: Option<Box<dyn FnMut()>>,

    /// Every playback tick
    pub on_update: Option<Box<dyn FnMut()>>,

    /// Every pause
    pub on_pause: Option<Box<dyn FnMut()>>,

    /// End of playback (also fired after `on_error`)
    pub on_end: Option<Box<dyn FnMut()>>,

    /// Device-level failure
    pub on_error: Option<Box<dyn FnMut(&str)>>,
}

impl fmt::Debug for AudioCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioCallbacks")
            .field("on_play", &self.on_play.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_pause", &self.on_pause.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Options for `Track::register_audio`
///
/// Every field is optional; unset volume / mute / loop / locale fall through
/// per-track defaults, inherited (parent) options and global defaults.
#[derive(Debug, Default)]
pub struct RegisterOptions {
    /// Per-call audio settings (first layer of the settings chain)
    pub audio: AudioOptions,

    /// Explicit subtitle lookup key
    pub key_for_subtitles: Option<String>,

    /// Subtitles for this item, bypassing the injected mapping
    pub subtitles: Option<Vec<Subtitle>>,

    /// Filename to report instead of the one derived from the source
    pub original_filename: Option<String>,

    /// Accept this source even if it is already queued
    pub allow_duplicates: bool,

    /// Queue index to insert at; `0` means "play immediately"
    pub priority: Option<i64>,

    /// Lifecycle hooks
    pub callbacks: AudioCallbacks,
}

impl RegisterOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn volume(mut self, volume: f32) -> Self {
        self.audio.volume = Some(volume);
        self
    }

    #[must_use]
    pub fn muted(mut self, muted: bool) -> Self {
        self.audio.muted = Some(muted);
        self
    }

    #[must_use]
    pub fn looped(mut self, looped: bool) -> Self {
        self.audio.looped = Some(looped);
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.audio.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn key_for_subtitles(mut self, key: impl Into<String>) -> Self {
        self.key_for_subtitles = Some(key.into());
        self
    }

    #[must_use]
    pub fn subtitles(mut self, subtitles: Vec<Subtitle>) -> Self {
        self.subtitles = Some(subtitles);
        self
    }

    #[must_use]
    pub fn original_filename(mut self, filename: impl Into<String>) -> Self {
        self.original_filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn on_play(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_play = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_update(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_update = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_pause(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_pause = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_end = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_error(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.callbacks.on_error = Some(Box::new(f));
        self
    }
}

/// How a string skip target is compared against queued sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipMethod {
    /// Source equals the pattern exactly
    Match,

    /// Source contains the pattern
    Include,
}

impl SkipMethod {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Include => "include",
        }
    }
}

impl FromStr for SkipMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "match" => Ok(Self::Match),
            "include" => Ok(Self::Include),
            other => Err(CoreError::invalid_input(format!("unknown skip method: {other}"))),
        }
    }
}

impl fmt::Display for SkipMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which queued item `Track::skip_audio` terminates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipTarget {
    /// Queue index; negative or out-of-range indices match nothing
    Index(i64),

    /// First item whose source matches `pattern`
    Source {
        /// Source or fragment to look for
        pattern: String,
        /// Comparison mode
        method: SkipMethod,
    },
}

impl SkipTarget {
    /// First item whose source equals `src`
    pub fn matching(src: impl Into<String>) -> Self {
        Self::Source {
            pattern: src.into(),
            method: SkipMethod::Match,
        }
    }

    /// First item whose source contains `fragment`
    pub fn including(fragment: impl Into<String>) -> Self {
        Self::Source {
            pattern: fragment.into(),
            method: SkipMethod::Include,
        }
    }
}

impl Default for SkipTarget {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl From<i64> for SkipTarget {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

/// Partial settings update for `Track::update_state`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackSettingsUpdate {
    pub auto_play: Option<bool>,

    #[serde(rename = "loop")]
    pub looped: Option<bool>,

    pub muted: Option<bool>,

    /// Stored and cascaded as given (not clamped)
    pub volume: Option<f32>,

    pub allow_duplicates: Option<bool>,
}

impl TrackSettingsUpdate {
    /// Empty update
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = Some(auto_play);
        self
    }

    #[must_use]
    pub fn looped(mut self, looped: bool) -> Self {
        self.looped = Some(looped);
        self
    }

    #[must_use]
    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = Some(muted);
        self
    }

    #[must_use]
    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    #[must_use]
    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = Some(allow);
        self
    }
}
