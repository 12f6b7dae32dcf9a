//! Simulator configuration
//!
//! Loaded from `$XDG_CONFIG_HOME/flick-sim/config.toml` (or `--config`).
//! Every field has a default, so a missing or partial file is fine.
//! The Gemini key can also come from `GEMINI_API_KEY` or `API_KEY`.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shell::{Mode, Theme};

/// Environment variables checked for the API key, in order
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// How long the boot splash stays up before the lock screen
    pub boot_delay_ms: u64,
    pub ai: AiConfig,
    pub status: StatusConfig,
    pub shell: ShellConfig,
}

/// Text generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Gemini API key; absent means demo mode
    pub api_key: Option<String>,
    pub model: String,
    /// Per-request timeout (HTTP client and worker)
    pub timeout_seconds: u64,
    /// Override the API base URL (testing against a local mock)
    pub base_url: Option<String>,
    /// Abort in-flight requests when the user navigates to another screen
    pub cancel_on_navigate: bool,
    /// Fetch the Now Brief widget text when the home screen first shows
    pub now_brief: bool,
}

/// Fake status bar values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub battery: u8,
    pub time: String,
    pub energy_score: u8,
}

/// Initial look of the shell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub theme: Theme,
    pub mode: Mode,
}

fn default_boot_delay_ms() -> u64 { 2500 }

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            boot_delay_ms: default_boot_delay_ms(),
            ai: AiConfig::default(),
            status: StatusConfig::default(),
            shell: ShellConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            timeout_seconds: 30,
            base_url: None,
            cancel_on_navigate: false,
            now_brief: true,
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            battery: 100,
            time: "8:30 AM".to_string(),
            energy_score: 85,
        }
    }
}

impl SimConfig {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok()
            .map(|dir| dir.join("flick-sim/config.toml"))
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from `path` (or the default location), falling back to
    /// defaults, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(ref path) if path.exists() => match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("{}, using defaults", e);
                    Self::default()
                }
            },
            _ => {
                tracing::info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Take the API key from the environment if one is set
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|key| !key.trim().is_empty())
        {
            tracing::debug!("Using API key from environment");
            self.ai.api_key = Some(key);
        }
    }

    /// Command-line overrides, applied last
    pub fn apply_cli(&mut self, boot_delay_ms: Option<u64>, offline: bool) {
        if let Some(ms) = boot_delay_ms {
            self.boot_delay_ms = ms;
        }
        if offline {
            tracing::info!("Offline mode, ignoring any API key");
            self.ai.api_key = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.boot_delay_ms, 2500);
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert!(config.ai.api_key.is_none());
        assert!(!config.ai.cancel_on_navigate);
        assert_eq!(config.status.time, "8:30 AM");
        assert_eq!(config.shell.theme, Theme::Default);
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "boot_delay_ms = 100\n\n[ai]\ntimeout_seconds = 5\n\n[shell]\ntheme = \"NEON\"\nmode = \"SLEEP\""
        )
        .unwrap();

        let config = SimConfig::from_file(file.path()).unwrap();
        assert_eq!(config.boot_delay_ms, 100);
        assert_eq!(config.ai.timeout_seconds, 5);
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert_eq!(config.shell.theme, Theme::Neon);
        assert_eq!(config.shell.mode, Mode::Sleep);
        assert_eq!(config.status.battery, 100);
    }

    #[test]
    fn test_bad_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "boot_delay_ms = \"soon\"").unwrap();

        assert!(matches!(
            SimConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        let config = SimConfig::load(Some(file.path()));
        assert_eq!(config.boot_delay_ms, 2500);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(SimConfig::from_file(&path), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_env_key_override() {
        let mut config = SimConfig::default();
        config.ai.api_key = Some("from-file".to_string());

        config.apply_env(|name| match name {
            "GEMINI_API_KEY" => Some(String::new()),
            "API_KEY" => Some("from-env".to_string()),
            _ => None,
        });
        assert_eq!(config.ai.api_key.as_deref(), Some("from-env"));

        config.apply_env(|_| None);
        assert_eq!(config.ai.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = SimConfig::default();
        config.apply_env(|_| Some("secret".to_string()));
        config.apply_cli(Some(0), true);
        assert_eq!(config.boot_delay_ms, 0);
        assert!(config.ai.api_key.is_none());

        config.ai.api_key = Some("kept".to_string());
        config.apply_cli(None, false);
        assert_eq!(config.boot_delay_ms, 0);
        assert_eq!(config.ai.api_key.as_deref(), Some("kept"));
    }
}
