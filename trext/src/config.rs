//! Configuration for the trext CLI.
//!
//! A small optional TOML file supplies defaults for the per-run
//! options; command-line flags always win. Looked up explicitly via
//! `--config`, then `./trext.toml`, then the user configuration
//! directory.

use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrextError};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "trext.toml";

/// Defaults applied to every run unless overridden on the command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// `.` matches `\n` by default.
    #[serde(default)]
    pub dotall: bool,

    /// Executor timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Emit results as JSON by default.
    #[serde(default)]
    pub json: bool,

    /// Return matched text instead of indices by default.
    #[serde(default)]
    pub binary: bool,
}

fn default_timeout_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dotall: false,
            timeout_ms: default_timeout_ms(),
            json: false,
            binary: false,
        }
    }
}

impl Config {
    /// Load configuration: the explicit path if given, otherwise the
    /// first discovered file, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        for candidate in Self::candidates() {
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| TrextError::Config(format!("{}: {e}", path.display())))
    }

    /// Search locations, nearest first.
    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = config_dir() {
            paths.push(dir.join("trext").join(CONFIG_FILE_NAME));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(!config.dotall);
        assert_eq!(config.timeout_ms, 1000);
        assert!(!config.json);
        assert!(!config.binary);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("dotall = true").unwrap();
        assert!(config.dotall);
        assert_eq!(config.timeout_ms, 1000);
    }

    #[test]
    fn full_file_round_trips() {
        let config = Config {
            dotall: true,
            timeout_ms: 250,
            json: true,
            binary: true,
        };
        let text = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn bad_file_is_a_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "timeout_ms = \"soon\"").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(TrextError::Config(_))
        ));
    }
}
