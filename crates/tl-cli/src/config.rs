//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tl_core::TimelineOptions;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Column names, thresholds and layout ratios.
    pub timeline: TimelineOptions,

    /// Viewport used by `tl layout` when no size is given.
    pub viewport_width: f64,
    pub viewport_height: f64,

    /// Field delimiter for sources; inferred from the file name when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeline: TimelineOptions::default(),
            viewport_width: 1280.0,
            viewport_height: 800.0,
            delimiter: None,
        }
    }
}

impl Config {
    /// Loads configuration from default locations, optionally adding a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TL_*, nested keys split on "__")
        figment = figment.merge(Env::prefixed("TL_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for tl.
///
/// On Linux: `~/.config/tl`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tl"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_tl() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "tl");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "viewport_width = 640.0\n\n[timeline]\norder_column = \"scene\"\nminimum_interaction_count = 3"
        )
        .unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.timeline.order_column, "scene");
        assert_eq!(config.timeline.minimum_interaction_count, 3);
        assert_eq!(config.timeline.participant_a_column, "source");
        assert!((config.viewport_width - 640.0).abs() < f64::EPSILON);
        assert!((config.viewport_height - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().timeline.validate().is_ok());
    }
}
