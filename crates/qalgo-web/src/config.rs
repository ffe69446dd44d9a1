//! Configuration management for the web service.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. `.env` files
//! 3. Environment variables (with `QALGO_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Opinion persistence.
    pub storage: StorageConfig,
    /// Where rendered artifacts go.
    pub output: OutputConfig,
    /// Simulator settings.
    pub simulation: SimulationConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address, e.g. `127.0.0.1:5000`.
    pub bind_address: String,
    /// Allow any origin, method and header.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".into(),
            cors_permissive: true,
        }
    }
}

/// Opinion store backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file.
    #[default]
    Sqlite,
    /// Process memory.
    Memory,
}

/// Opinion persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store backend.
    pub backend: StorageBackend,
    /// Database file for the SQLite backend.
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: Some(PathBuf::from("db.sqlite3")),
        }
    }
}

/// Artifact sink kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// SVG files under `results_dir`.
    #[default]
    Filesystem,
    /// Keep artifacts in memory.
    Memory,
}

/// Artifact output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Sink kind.
    pub mode: OutputMode,
    /// Root of the filesystem sink.
    pub results_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Filesystem,
            results_dir: PathBuf::from("results"),
        }
    }
}

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Shots when a request does not choose.
    pub default_shots: u32,
    /// Largest circuit accepted.
    pub max_qubits: u32,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_shots: 1024,
            max_qubits: 20,
            seed: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Console,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Console,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        serde_yaml_ng::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration with the following precedence:
    /// 1. Load `.env` if it exists
    /// 2. Load from file if provided
    /// 3. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QALGO_*` overrides read through `lookup`.
    ///
    /// Only variables that are set override the current values.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QALGO_BIND") {
            self.server.bind_address = v;
        }
        if let Some(v) = lookup("QALGO_STORAGE") {
            self.storage.backend = parse_enum("QALGO_STORAGE", &v)?;
        }
        if let Some(v) = lookup("QALGO_DATABASE") {
            self.storage.path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("QALGO_OUTPUT") {
            self.output.mode = parse_enum("QALGO_OUTPUT", &v)?;
        }
        if let Some(v) = lookup("QALGO_RESULTS_DIR") {
            self.output.results_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("QALGO_SHOTS") {
            self.simulation.default_shots = parse_number("QALGO_SHOTS", &v)?;
        }
        if let Some(v) = lookup("QALGO_MAX_QUBITS") {
            self.simulation.max_qubits = parse_number("QALGO_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("QALGO_SEED") {
            self.simulation.seed = Some(parse_number("QALGO_SEED", &v)?);
        }
        if let Some(v) = lookup("QALGO_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("QALGO_LOG_FORMAT") {
            self.logging.format = parse_enum("QALGO_LOG_FORMAT", &v)?;
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;

        if self.simulation.default_shots == 0 {
            return Err(ConfigError::ValidationError(
                "default_shots must be positive".into(),
            ));
        }
        if self.simulation.max_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "max_qubits must be positive".into(),
            ));
        }
        if self.storage.backend == StorageBackend::Sqlite && self.storage.path.is_none() {
            return Err(ConfigError::ValidationError(
                "sqlite storage requires a path".into(),
            ));
        }
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown log level: {other}"
                )));
            }
        }
        Ok(())
    }

    /// The parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.bind_address.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "Invalid bind address: {}",
                self.server.bind_address
            ))
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{key}: '{value}' is not a number")))
}

fn parse_enum<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> Result<T, ConfigError> {
    serde_yaml_ng::from_str(&value.trim().to_ascii_lowercase())
        .map_err(|_| ConfigError::ValidationError(format!("{key}: unsupported value '{value}'")))
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
