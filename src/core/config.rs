//! Configuration constants and settings

use anyhow::{Context, Result};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Remote API
pub const DEFAULT_BASE_URL: &str = "https://9yhyi3c870vy.manus.space/api";
pub const BASE_URL_ENV_VAR: &str = "QUIZ_API_URL";
pub const CONFIG_DIR_NAME: &str = "wedding-quiz";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// Polling cadence shared by the game state and moderator statistics loops
pub const POLL_INTERVAL_SECS: u64 = 3;

// Auto-dismiss lifetimes for user-visible messages
pub const ERROR_MESSAGE_TTL: Duration = Duration::from_secs(5);
pub const SUCCESS_MESSAGE_TTL: Duration = Duration::from_secs(3);

// Client-side number ranges
pub const VOTE_RANGE: RangeInclusive<i64> = 1..=25;
pub const PREDICTION_RANGE: RangeInclusive<i64> = 1..=100;

// UI Constants
pub const DEFAULT_DRINK_BREAK_MESSAGE: &str = "Drink break! 🍻";
pub const NOT_REGISTERED_MESSAGE: &str = "Register first to join the game.";
pub const TEAM_TREE_INDENT: &str = "   ";

/// Settings read from the user's config file
///
/// Every field is optional in the file; missing values fall back to the defaults above.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub poll_interval_secs: u64,
    /// Unset means the HTTP client's own default applies
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: POLL_INTERVAL_SECS,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Parses a TOML config document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid client configuration")
    }

    /// Reads a config file, returning defaults when the file does not exist
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }
}

/// Default location of the config file, e.g. `~/.config/wedding-quiz/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolves the client configuration from CLI args, environment and config file
///
/// Priority order for the base URL:
/// 1. --api-url flag
/// 2. QUIZ_API_URL env var
/// 3. base_url from the config file
/// 4. Built-in default
pub fn resolve_config(api_url: Option<&str>, config_path: Option<&Path>) -> Result<ClientConfig> {
    let mut config = match config_path {
        Some(path) => ClientConfig::from_file(path)?,
        None => match default_config_path() {
            Some(path) => ClientConfig::from_file(&path)?,
            None => ClientConfig::default(),
        },
    };

    let env_url = std::env::var(BASE_URL_ENV_VAR).ok();
    if let Some(url) = pick_base_url(api_url, env_url.as_deref()) {
        config.base_url = url;
    }

    Ok(config)
}

fn pick_base_url(flag: Option<&str>, env: Option<&str>) -> Option<String> {
    flag.or(env)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| url.trim_end_matches('/').to_string())
}
