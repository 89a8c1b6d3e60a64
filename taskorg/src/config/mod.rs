//! Configuration system for the `TaskOrganizer` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskorg/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use taskorg_proto::task::MAX_TASK_TITLE_LENGTH;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    service: ServiceFileConfig,
    ui: UiFileConfig,
}

/// `[service]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServiceFileConfig {
    url: Option<String>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    max_title_len: Option<usize>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Which task service the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceTarget {
    /// The remote REST service at this base URL.
    Remote(String),
    /// The built-in in-memory demo service.
    Demo,
}

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the task service.
    pub service_url: Option<String>,
    /// Use the in-memory demo service even if a URL is configured.
    pub demo: bool,
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Maximum task title length accepted by the creation dialog.
    pub max_title_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            demo: false,
            poll_timeout: Duration::from_millis(50),
            max_title_len: MAX_TASK_TITLE_LENGTH,
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/taskorg/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. Titles longer than the data model
    /// allows are clamped.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            service_url: cli
                .service_url
                .clone()
                .or_else(|| file.service.url.clone()),
            demo: cli.demo,
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            max_title_len: file
                .ui
                .max_title_len
                .map_or(defaults.max_title_len, |len| len.min(MAX_TASK_TITLE_LENGTH)),
        }
    }

    /// The service to talk to.
    ///
    /// Falls back to [`ServiceTarget::Demo`] when `--demo` is set or no
    /// service URL is configured.
    #[must_use]
    pub fn service_target(&self) -> ServiceTarget {
        match &self.service_url {
            Some(url) if !self.demo && !url.trim().is_empty() => ServiceTarget::Remote(url.clone()),
            _ => ServiceTarget::Demo,
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal task organizer")]
pub struct CliArgs {
    /// Base URL of the task service (e.g. `http://localhost:8080/TaskServices/broker`).
    #[arg(long, env = "TASKORG_SERVICE_URL")]
    pub service_url: Option<String>,

    /// Path to config file (default: `~/.config/taskorg/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run against the built-in in-memory service.
    #[arg(long)]
    pub demo: bool,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKORG_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskorg.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskorg").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
