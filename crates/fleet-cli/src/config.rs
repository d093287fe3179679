//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use fleet_core::EngineConfig;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fixed reference instant for open intervals, in any format the date
    /// resolver accepts. Unset means the current time.
    pub now: Option<String>,

    /// Engine tunables.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    /// Loads configuration from the default location, then `config_path`,
    /// then `FLEET_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // FLEET_NOW, FLEET_ENGINE__TIMELINE__OTHER_EVENT_POLICY, ...
        figment = figment.merge(Env::prefixed("FLEET_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for fleet.
///
/// On Linux: `~/.config/fleet`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fleet"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use fleet_core::OtherEventPolicy;
    use tempfile::NamedTempFile;

    #[test]
    fn test_dirs_config_path_ends_with_fleet() {
        if let Some(path) = dirs_config_path() {
            assert_eq!(path.file_name().unwrap(), "fleet");
        }
    }

    #[test]
    fn test_default_config_has_no_fixed_now() {
        let config = Config::default();
        assert!(config.now.is_none());
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"now = "2026-01-12"

[engine.timeline]
other_event_policy = "keep_previous"
min_timeline_days = 2.0"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.now.as_deref(), Some("2026-01-12"));
        assert_eq!(
            config.engine.timeline.other_event_policy,
            OtherEventPolicy::KeepPrevious
        );
        assert!((config.engine.timeline.min_timeline_days - 2.0).abs() < f64::EPSILON);
    }
}
