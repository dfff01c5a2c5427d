//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chatline/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::remote::graph::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatlineConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub cache_path: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GraphConfig {
    pub base_url: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub show_timestamps: Option<bool>,
}

pub const DEFAULT_CACHE_FILE: &str = "cache.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub cache_path: PathBuf,
    pub base_url: String,
    pub access_token: Option<String>,
    pub show_timestamps: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.chatline/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatline"))
}

/// Load config from `~/.chatline/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatlineConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChatlineConfig, ConfigError> {
    let path = match config_dir() {
        Some(dir) => dir.join("config.toml"),
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChatlineConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ChatlineConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ChatlineConfig, ConfigError> {
    let config: ChatlineConfig = toml::from_str(contents).map_err(ConfigError::Parse)?;
    // Never log the token itself.
    debug!(
        "Config: cache_path={:?} base_url={:?} token_set={} show_timestamps={:?}",
        config.general.cache_path,
        config.graph.base_url,
        config.graph.access_token.is_some(),
        config.ui.show_timestamps
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# chatline configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# cache_path = "cache.json"          # Relative paths resolve against ~/.chatline/

# [graph]
# base_url = "https://graph.microsoft.com/v1.0"
# access_token = "eyJ0..."           # Or set CHATLINE_ACCESS_TOKEN env var

# [ui]
# show_timestamps = false            # Prefix chat lines with [HH:MM]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_cache_path` comes from the `--cache` flag (None = not specified).
pub fn resolve(config: &ChatlineConfig, cli_cache_path: Option<&Path>) -> ResolvedConfig {
    let base_dir = config_dir().unwrap_or_else(|| PathBuf::from("."));

    // Cache path: CLI → env → config → default
    let cache_path = cli_cache_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("CHATLINE_CACHE_PATH").ok().map(PathBuf::from))
        .or_else(|| config.general.cache_path.as_ref().map(PathBuf::from))
        .map(|p| if p.is_relative() { base_dir.join(p) } else { p })
        .unwrap_or_else(|| base_dir.join(DEFAULT_CACHE_FILE));

    // Base URL: env → config → default
    let base_url = std::env::var("CHATLINE_BASE_URL")
        .ok()
        .or_else(|| config.graph.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Access token: env → config
    let access_token = std::env::var("CHATLINE_ACCESS_TOKEN")
        .ok()
        .or_else(|| config.graph.access_token.clone());

    ResolvedConfig {
        cache_path,
        base_url,
        access_token,
        show_timestamps: config.ui.show_timestamps.unwrap_or(false),
    }
}
