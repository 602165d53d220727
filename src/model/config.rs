//! Application configuration structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Remote profile directory options
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RemoteConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Appended to the profile name to form the gist filename
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

/// Local profile options
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProfileConfig {
    #[serde(default = "default_profile_name")]
    pub default_name: String,
    /// Overrides `~/.shell_profiler`
    #[serde(default)]
    pub data_dir: Option<String>,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_file_extension() -> String {
    ".shprofile.json".to_string()
}

fn default_profile_name() -> String {
    "DefaultProfile".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            file_extension: default_file_extension(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            default_name: default_profile_name(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Get the shprof configuration directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            })
            .join("shprof")
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from `path`, or return default if the file doesn't exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
