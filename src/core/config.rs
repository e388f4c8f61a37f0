//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.dotdash/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_MAX_FILE_SIZE;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DotdashConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HistoryConfig {
    pub path: Option<String>,
    pub strict: Option<bool>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FilesConfig {
    pub max_size: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub color: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HISTORY_FILE: &str = "morse_history.json";
pub const DEFAULT_LOG_FILE: &str = "dotdash.log";

// ============================================================================
// CLI overrides and resolved config
// ============================================================================

/// Settings that came from command-line flags (None/false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub history_path: Option<PathBuf>,
    pub no_history: bool,
    pub strict_history: bool,
    pub verbose: bool,
    pub no_color: bool,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub history_path: PathBuf,
    pub history_enabled: bool,
    pub strict_history: bool,
    pub max_file_size: u64,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub color: bool,
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

/// Returns the path to `~/.dotdash/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".dotdash").join("config.toml"))
}

/// Load config from `~/.dotdash/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DotdashConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DotdashConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DotdashConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DotdashConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<DotdashConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DotdashConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# dotdash configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [history]
# path = "morse_history.json"   # Or set DOTDASH_HISTORY_FILE env var
# strict = false                # Refuse to overwrite a corrupt history file
# enabled = true

# [files]
# max_size = 1048576            # Bytes

# [logging]
# file = "dotdash.log"          # Or set DOTDASH_LOG_FILE env var
# level = "info"                # "error", "warn", "info", "debug", "trace", "off"

# [display]
# color = true
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
pub fn resolve(config: &DotdashConfig, cli: &CliOverrides) -> ResolvedConfig {
    // History path: CLI → env → config → default
    let history_path = cli
        .history_path
        .clone()
        .or_else(|| std::env::var("DOTDASH_HISTORY_FILE").ok().map(PathBuf::from))
        .or_else(|| config.history.path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE));

    // Log file: env → config → default
    let log_file = std::env::var("DOTDASH_LOG_FILE")
        .ok()
        .or_else(|| config.logging.file.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    // --verbose always wins; otherwise config level, falling back to info
    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config
            .logging
            .level
            .as_deref()
            .and_then(parse_level)
            .unwrap_or(LevelFilter::Info)
    };

    ResolvedConfig {
        history_path,
        history_enabled: !cli.no_history && config.history.enabled.unwrap_or(true),
        strict_history: cli.strict_history || config.history.strict.unwrap_or(false),
        max_file_size: config.files.max_size.unwrap_or(DEFAULT_MAX_FILE_SIZE),
        log_file,
        log_level,
        color: !cli.no_color && config.display.color.unwrap_or(true),
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.parse() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Unknown log level {:?}, using info", level);
            None
        }
    }
}
