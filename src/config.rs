//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::client::{ClientConfig, DEFAULT_BASE_URL};
use crate::ranker::RankerConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Places client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No timeout when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSection {
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.map(|s| s * 1000),
        }
    }
}

/// Ranking server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn to_api_config(&self) -> ApiConfig {
        ApiConfig::from(self)
    }
}

/// Catalog and ranking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Places the catalog is scored against; the catalog itself when unset
    #[serde(default)]
    pub reference_path: Option<String>,

    #[serde(default = "default_history_weight")]
    pub history_weight: f64,

    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_catalog_path() -> String {
    "./places.json".to_string()
}

fn default_history_weight() -> f64 {
    0.4
}

fn default_top_k() -> usize {
    5
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            reference_path: None,
            history_weight: default_history_weight(),
            top_k: default_top_k(),
        }
    }
}

impl RankingConfig {
    pub fn to_ranker_config(&self) -> RankerConfig {
        RankerConfig {
            history_weight: self.history_weight,
            top_k: self.top_k,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("wanderlist").join("config.toml")),
            Some(PathBuf::from("/etc/wanderlist/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Client overrides
        if let Some(url) = lookup("WANDERLIST_BASE_URL") {
            self.client.base_url = url;
        }

        // Server overrides
        if let Some(host) = lookup("WANDERLIST_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WANDERLIST_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Ranking overrides
        if let Some(path) = lookup("WANDERLIST_CATALOG") {
            self.ranking.catalog_path = path;
        }
        if let Some(path) = lookup("WANDERLIST_REFERENCE") {
            self.ranking.reference_path = Some(path);
        }

        // Logging overrides
        if let Some(level) = lookup("WANDERLIST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WANDERLIST_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Wanderlist Configuration
#
# Environment variables override these settings:
# - WANDERLIST_BASE_URL
# - WANDERLIST_HOST
# - WANDERLIST_PORT
# - WANDERLIST_CATALOG
# - WANDERLIST_REFERENCE
# - WANDERLIST_LOG_LEVEL
# - WANDERLIST_LOG_FORMAT

[client]
# Address of the ranking service
base_url = "http://127.0.0.1:5000"

# Request timeout in seconds (no timeout when unset)
# request_timeout_secs = 30

[server]
# Ranking server host
host = "127.0.0.1"

# Ranking server port
port = 5000

# Allowed CORS origins (any origin when empty)
cors_origins = []

[ranking]
# Catalog of places (.json or .csv)
catalog_path = "./places.json"

# Reference places the catalog is scored against (defaults to the catalog)
# reference_path = "./reference.json"

# Weight of the click history bias
history_weight = 0.4

# Number of best reference matches averaged into a place's score
top_k = 5

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
