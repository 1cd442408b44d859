/// Track configuration
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix (`AUDIOTRACK_VOLUME`, `AUDIOTRACK_AUTO_PLAY`, ...)
pub const ENV_PREFIX: &str = "AUDIOTRACK";

/// Construction settings for a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Position of the track inside its manager
    #[serde(default)]
    pub index: usize,

    /// Custom display name (default: "Track #<index>")
    #[serde(default)]
    pub name: Option<String>,

    /// Initial volume, clamped into 0.0 - 1.0 by the track
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Initial mute flag
    #[serde(default)]
    pub muted: bool,

    /// Initial loop flag
    #[serde(default, rename = "loop")]
    pub looped: bool,

    /// Start items automatically
    #[serde(default)]
    pub auto_play: bool,

    /// Accept sources that are already queued
    #[serde(default)]
    pub allow_duplicates: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            index: 0,
            name: None,
            volume: default_volume(),
            muted: false,
            looped: false,
            auto_play: false,
            allow_duplicates: false,
        }
    }
}

impl TrackConfig {
    /// Config for the track at `index` with every other field defaulted
    pub fn for_index(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables (prefixed with `AUDIOTRACK_`) override the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            }
        }

        settings = settings.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Display name used when no custom name is configured
pub fn default_name(index: usize) -> String {
    format!("Track #{index}")
}

fn default_volume() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = TrackConfig::default();
        assert_eq!(config.index, 0);
        assert_eq!(config.name, None);
        assert_eq!(config.volume, 1.0);
        assert!(!config.muted);
        assert!(!config.looped);
        assert!(!config.auto_play);
        assert!(!config.allow_duplicates);
    }

    #[test]
    fn parses_partial_toml() {
        let config = TrackConfig::from_toml_str(
            r#"
            index = 2
            volume = 0.4
            loop = true
            auto_play = true
            "#,
        )
        .unwrap();

        assert_eq!(config.index, 2);
        assert_eq!(config.volume, 0.4);
        assert!(config.looped);
        assert!(config.auto_play);
        assert!(!config.muted);
        assert_eq!(config.name, None);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = TrackConfig::from_toml_str("volume = \"loud\"").unwrap_err();
        assert!(matches!(err, crate::TrackError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "name = \"Voice\"\nallow_duplicates = true").unwrap();

        let config = TrackConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.name.as_deref(), Some("Voice"));
        assert!(config.allow_duplicates);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = TrackConfig::load(Some(Path::new("/nonexistent/audiotrack.toml"))).unwrap();
        assert_eq!(config.volume, 1.0);
    }

    #[test]
    fn default_name_format() {
        assert_eq!(default_name(3), "Track #3");
    }
}
