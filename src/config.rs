use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version::error::ConfigError;

// =============================================================================
// File and directory names
// =============================================================================

/// Manifest file collected by the file lister
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Workspace descriptor read from the scanned root
pub const WORKSPACE_FILE_NAME: &str = "pnpm-workspace.yaml";

/// Directories never descended into
pub const ALWAYS_SKIPPED_DIRS: [&str; 2] = [".git", "node_modules"];

// =============================================================================
// Defaults
// =============================================================================

/// Default base URL for npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// User agent sent with registry requests
pub const DEFAULT_USER_AGENT: &str = "npm-check";

/// Log filter used when neither the flag nor the environment sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable overriding the registry URL
pub const REGISTRY_ENV: &str = "NPM_CHECK_REGISTRY";

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "NPM_CHECK_LOG";

/// Configuration read from the user's config file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckConfig {
    pub registry_url: String,
    pub user_agent: String,
    /// Directory names skipped in addition to `.git` and `node_modules`
    pub skip_dirs: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            skip_dirs: Vec::new(),
        }
    }
}

impl CheckConfig {
    /// Load the config file if there is one, defaults otherwise
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&config_path(), std::env::var(REGISTRY_ENV).ok())
    }

    /// Load `path`, then let the registry environment value replace the file's URL
    fn load_with_env(path: &Path, env_registry: Option<String>) -> Result<Self, ConfigError> {
        Ok(Self::load_from(path)?.with_registry_override(env_registry))
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace the registry URL when an override is present and non-empty
    pub fn with_registry_override(mut self, registry_url: Option<String>) -> Self {
        if let Some(url) = registry_url.filter(|url| !url.trim().is_empty()) {
            self.registry_url = url;
        }
        self
    }
}

/// Returns the log filter: the flag, then NPM_CHECK_LOG, then "warn"
pub fn log_filter(flag: Option<String>) -> String {
    log_filter_with_env(flag, std::env::var(LOG_ENV).ok())
}

fn log_filter_with_env(flag: Option<String>, env_filter: Option<String>) -> String {
    flag.or(env_filter)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Returns the path to the config file.
/// Uses $XDG_CONFIG_HOME/npm-check/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/npm-check/config.json,
/// or ./npm-check/config.json if neither is available.
pub fn config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir()).join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("npm-check")
}
