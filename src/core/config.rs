//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.libris/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LibrisConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub page_size: Option<u32>,
    pub data_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FavoritesConfig {
    pub allow_duplicates: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// The volumes endpoint rejects anything above this.
pub const MAX_PAGE_SIZE: u32 = 40;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://www.googleapis.com/books/v1";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub page_size: u32,
    /// `None` when no home directory could be found and none was configured.
    pub data_dir: Option<PathBuf>,
    pub catalog_base_url: String,
    pub catalog_api_key: Option<String>,
    pub timeout: Duration,
    pub allow_duplicates: bool,
}

/// Values from CLI flags. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub catalog_url: Option<String>,
    pub page_size: Option<u32>,
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

/// Returns `~/.libris`.
pub fn libris_home() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".libris"))
}

/// Returns the path to `~/.libris/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    libris_home().map(|dir| dir.join("config.toml"))
}

/// Load config from `~/.libris/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LibrisConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LibrisConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LibrisConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LibrisConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LibrisConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LibrisConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Libris Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# page_size = 20                     # 1-40, results per search
# data_dir = "/home/me/.libris"      # Where favorites.json lives. Or LIBRIS_DATA_DIR

# [catalog]
# base_url = "https://www.googleapis.com/books/v1"   # Or LIBRIS_CATALOG_URL
# api_key = "AIza..."                # Or set GOOGLE_BOOKS_API_KEY env var
# timeout_secs = 15

# [favorites]
# allow_duplicates = false           # Save the same book more than once
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LibrisConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Page size: CLI → env → config → default, clamped to what the API accepts
    let page_size = cli
        .page_size
        .or_else(|| {
            std::env::var("LIBRIS_PAGE_SIZE")
                .ok()
                .and_then(|v| v.trim().parse().ok())
        })
        .or(config.general.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    // Data dir: CLI → env → config → ~/.libris
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| std::env::var("LIBRIS_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.general.data_dir.as_ref().map(PathBuf::from))
        .or_else(libris_home);

    // Catalog URL: CLI → env → config → default
    let catalog_base_url = cli
        .catalog_url
        .clone()
        .or_else(|| std::env::var("LIBRIS_CATALOG_URL").ok())
        .or_else(|| config.catalog.base_url.clone())
        .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string());

    // API key: env → config
    let catalog_api_key = std::env::var("GOOGLE_BOOKS_API_KEY")
        .ok()
        .or_else(|| config.catalog.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    ResolvedConfig {
        page_size,
        data_dir,
        catalog_base_url,
        catalog_api_key,
        timeout: Duration::from_secs(
            config
                .catalog
                .timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS)
                .max(1),
        ),
        allow_duplicates: config.favorites.allow_duplicates.unwrap_or(false),
    }
}
