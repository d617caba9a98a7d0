//! Configuration loading and config file resolution
//!
//! Config file resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. `JANITOR_CONFIG` environment variable
//! 3. User config file, then system-wide config file
//! 4. Built-in defaults (no file)
//!
//! Selected values can then be overridden from the environment, see
//! [`TomlConfig::apply_env_overrides`].

use crate::library::SelectionStrategy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "JANITOR_CONFIG";
/// Environment override for the Sonarr base URL
pub const SONARR_URL_ENV_VAR: &str = "JANITOR_SONARR_URL";
/// Environment override for the Sonarr API key
pub const SONARR_API_KEY_ENV_VAR: &str = "JANITOR_SONARR_API_KEY";
/// Environment override for dry-run mode
pub const DRY_RUN_ENV_VAR: &str = "JANITOR_DRY_RUN";

/// Complete configuration loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub sonarr: SonarrConfig,

    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub filesystem: FileSystemConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File the values were read from; `None` means built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Connection settings for the Sonarr instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SonarrConfig {
    /// Base URL, e.g. `http://localhost:8989`
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Behaviour of a retention pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log intended mutations instead of performing them
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Upper bound on concurrent series/season units
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Which import event dates a season
    #[serde(default)]
    pub history_selection: SelectionStrategy,
}

/// Visibility of the media library filesystem
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileSystemConfig {
    /// The media folders are mounted where this process can see them
    #[serde(default)]
    pub access: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_dry_run() -> bool {
    true
}

fn default_workers() -> usize {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SonarrConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            dry_run: default_dry_run(),
            workers: default_workers(),
            history_selection: SelectionStrategy::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Resolve, read, override and validate the configuration.
    ///
    /// Runs before logging is set up, so the chosen file is recorded in
    /// [`TomlConfig::source`] for the caller to report.
    pub fn load(cli_arg: Option<&Path>) -> Result<Self> {
        let mut config = match resolve_config_path(cli_arg) {
            Some(path) => {
                let mut config = read_toml_config(&path)?;
                config.source = Some(path);
                config
            }
            None => TomlConfig::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `JANITOR_*` environment overrides on top of file values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(SONARR_URL_ENV_VAR) {
            self.sonarr.url = url;
        }
        if let Ok(key) = std::env::var(SONARR_API_KEY_ENV_VAR) {
            self.sonarr.api_key = key;
        }
        if let Ok(raw) = std::env::var(DRY_RUN_ENV_VAR) {
            self.application.dry_run = parse_bool(&raw).ok_or_else(|| {
                Error::Config(format!("{} must be true or false, got '{}'", DRY_RUN_ENV_VAR, raw))
            })?;
        }
        Ok(())
    }

    /// Reject configurations that cannot reach Sonarr or run a pass
    pub fn validate(&self) -> Result<()> {
        if self.sonarr.url.trim().is_empty() {
            return Err(Error::Config(format!(
                "Sonarr URL not configured. Set [sonarr] url or {}",
                SONARR_URL_ENV_VAR
            )));
        }
        if self.sonarr.api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "Sonarr API key not configured. Set [sonarr] api_key or {}",
                SONARR_API_KEY_ENV_VAR
            )));
        }
        if self.application.workers == 0 {
            return Err(Error::Config("application.workers must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Find the config file to read, if any
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    // Priority 3: user config, then system config
    let user_config = dirs::config_dir().map(|d| d.join("janitor").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    let system_config = PathBuf::from("/etc/janitor/config.toml");
    if system_config.exists() {
        return Some(system_config);
    }

    None
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
