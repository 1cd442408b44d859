//! Layered audio settings
//!
//! Each `AudioOptions` value is one layer. Resolution walks
//! per-call -> per-track -> inherited (parent) -> global defaults and
//! yields a single `ResolvedAudioSettings`.

use serde::{Deserialize, Serialize};

/// Volume used when no layer sets one
pub const DEFAULT_VOLUME: f32 = 1.0;

/// One layer of optional audio settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioOptions {
    /// Item volume
    pub volume: Option<f32>,

    /// Item mute flag
    pub muted: Option<bool>,

    /// Item loop flag
    #[serde(rename = "loop")]
    pub looped: Option<bool>,

    /// Locale used to filter captions
    pub locale: Option<String>,
}

/// Fully resolved settings for a new audio item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAudioSettings {
    /// Effective volume
    pub volume: f32,

    /// Effective mute flag
    pub muted: bool,

    /// Effective loop flag
    #[serde(rename = "loop")]
    pub looped: bool,

    /// Effective caption locale
    pub locale: Option<String>,
}

impl Default for ResolvedAudioSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
            looped: false,
            locale: None,
        }
    }
}

impl ResolvedAudioSettings {
    /// Resolve each field from the first layer that sets it
    pub fn resolve(
        per_call: &AudioOptions,
        per_track: &AudioOptions,
        inherited: &AudioOptions,
    ) -> Self {
        let layers = [per_call, per_track, inherited];
        let defaults = Self::default();

        Self {
            volume: layers
                .iter()
                .find_map(|layer| layer.volume)
                .unwrap_or(defaults.volume),
            muted: layers
                .iter()
                .find_map(|layer| layer.muted)
                .unwrap_or(defaults.muted),
            looped: layers
                .iter()
                .find_map(|layer| layer.looped)
                .unwrap_or(defaults.looped),
            locale: layers
                .iter()
                .find_map(|layer| layer.locale.clone())
                .or(defaults.locale),
        }
    }
}
