//! Configuration loading
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (handled by each binary's clap definitions)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The TOML file is either given explicitly (`--config`), in which case it
//! must exist, or looked up at `<config dir>/tabulaxy/config.toml`. A
//! missing default file is not an error: a warning is logged and the
//! compiled defaults apply.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default output database, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "public/assets/tabulaxy.db";

/// Default JSON corpus, relative to the working directory
pub const DEFAULT_CORPUS_PATH: &str = "public/data/words.json";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// SQLite database written by the bulk generator
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// JSON corpus maintained by the enrichment tool
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub oracle: OracleConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Bulk generator settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Synthetic entries produced for each generated mode
    #[serde(default = "default_words_per_mode")]
    pub words_per_mode: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            words_per_mode: default_words_per_mode(),
        }
    }
}

/// Text oracle settings for the enrichment tool
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Words requested per auto-loop batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Most recent known targets quoted in each request
    #[serde(default = "default_known_sample_size")]
    pub known_sample_size: usize,

    /// Pause after a successful auto-loop batch
    #[serde(default = "default_success_pause_secs")]
    pub success_pause_secs: u64,

    /// Pause after a failed auto-loop batch
    #[serde(default = "default_failure_pause_secs")]
    pub failure_pause_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            batch_size: default_batch_size(),
            known_sample_size: default_known_sample_size(),
            success_pause_secs: default_success_pause_secs(),
            failure_pause_secs: default_failure_pause_secs(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_words_per_mode() -> usize {
    10_000
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_batch_size() -> usize {
    20
}

fn default_known_sample_size() -> usize {
    50
}

fn default_success_pause_secs() -> u64 {
    2
}

fn default_failure_pause_secs() -> u64 {
    5
}

impl TomlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Database path: CLI/env value, then TOML, then compiled default
    pub fn resolve_database_path(&self, cli_arg: Option<&Path>) -> PathBuf {
        resolve_path(cli_arg, self.database_path.as_deref(), DEFAULT_DATABASE_PATH)
    }

    /// Corpus path: CLI/env value, then TOML, then compiled default
    pub fn resolve_corpus_path(&self, cli_arg: Option<&Path>) -> PathBuf {
        resolve_path(cli_arg, self.corpus_path.as_deref(), DEFAULT_CORPUS_PATH)
    }
}

fn resolve_path(cli_arg: Option<&Path>, toml_value: Option<&Path>, default: &str) -> PathBuf {
    cli_arg
        .or(toml_value)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Platform config file location: `<config dir>/tabulaxy/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tabulaxy").join("config.toml"))
}

/// Load the TOML configuration
///
/// An explicit path must exist and parse. Without one, the platform
/// default is tried and its absence yields the compiled defaults.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        let config = TomlConfig::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        return Ok(config);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
            let config = TomlConfig::from_toml_str(&content)?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        Some(path) => {
            warn!("No config file at {}, using defaults", path.display());
            Ok(TomlConfig::default())
        }
        None => {
            warn!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}
