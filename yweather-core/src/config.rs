use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Settings stored on disk for callers of the library.
///
/// Example TOML:
/// ```toml
/// default_location = "Columbus, OH"
/// endpoint = "https://query.yahooapis.com/v1/public/yql"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Location used when none is given on the command line.
    pub default_location: Option<String>,

    /// Override for the YQL endpoint.
    pub endpoint: Option<String>,

    /// Request timeout; requests wait indefinitely when unset.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// The location to look up: `explicit` if given, otherwise the configured default.
    pub fn resolve_location(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.default_location.clone())
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No location given and no default location configured.\n\
                     Hint: pass a location, or run `yweather configure` first."
                )
            })
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "yweather", "yweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_location_errors_when_nothing_set() {
        let cfg = Config::default();
        let err = cfg.resolve_location(None).unwrap_err();

        assert!(err.to_string().contains("no default location configured"));
    }

    #[test]
    fn explicit_location_wins_over_default() {
        let cfg = Config {
            default_location: Some("Columbus, OH".into()),
            ..Config::default()
        };

        assert_eq!(cfg.resolve_location(Some("Paris".into())).unwrap(), "Paris");
        assert_eq!(cfg.resolve_location(None).unwrap(), "Columbus, OH");
    }

    #[test]
    fn blank_location_is_rejected() {
        let cfg = Config::default();
        assert!(cfg.resolve_location(Some("   ".into())).is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            default_location: Some("Reykjavik".into()),
            endpoint: None,
            timeout_secs: Some(5),
        };

        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
