use crate::error::{Result, TaggerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "mergetag.toml";

/// Represents the file configuration for merge-tagger.
///
/// Everything here has a default; CI-provided values (repository, token, event
/// payload) come from the command line or environment instead.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote_name() -> String {
    "github".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_server_url() -> String {
    "https://github.com".to_string()
}

fn default_true() -> bool {
    true
}

/// Remote the new tag is pushed to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
        }
    }
}

/// Hosting service endpoints.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            server_url: default_server_url(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Compute and report the tag without creating, pushing or commenting
    #[serde(default)]
    pub dry_run: bool,

    /// Comment on the pull request with the outcome
    #[serde(default = "default_true")]
    pub comment: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            dry_run: false,
            comment: true,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `mergetag.toml` in current directory
/// 3. `.mergetag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE).exists() {
        Path::new(CONFIG_FILE).to_path_buf()
    } else {
        match dirs::config_dir().map(|dir| dir.join(format!(".{}", CONFIG_FILE))) {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        }
    };

    let config_str = fs::read_to_string(&path)
        .map_err(|e| TaggerError::config(format!("Cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&config_str)
        .map_err(|e| TaggerError::config(format!("Invalid {}: {}", path.display(), e)))
}
