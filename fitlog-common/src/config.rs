//! Configuration loading and root folder resolution
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `FITLOG_ROOT_FOLDER`
//! 3. TOML config file (`root_folder` key)
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or malformed config file never stops startup. It is reported
//! with a warning and the compiled defaults are used instead.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "FITLOG_ROOT_FOLDER";

/// Environment variable pointing at an explicit config file
pub const CONFIG_FILE_ENV: &str = "FITLOG_CONFIG";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "fitlog.db";

/// Program store file name inside the root folder
pub const PROGRAMS_FILE: &str = "programs.json";

/// Built-in defaults used when nothing else is configured
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub session_ttl_hours: i64,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            host: "127.0.0.1".to_string(),
            port: 5780,
            session_ttl_hours: 24 * 30,
            log_level: "info".to_string(),
        }
    }
}

/// `[logging]` table of the TOML config
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
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

fn default_log_level() -> String {
    "info".to_string()
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub session_ttl_hours: Option<i64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse a config file at an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }

    /// Locate and parse the platform config file
    ///
    /// Returns `None` when no file exists or the file is unreadable.
    pub fn load_default() -> Option<Self> {
        let path = config_file_path()?;
        match Self::load(&path) {
            Ok(config) => {
                debug!("Loaded config file: {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Find the config file for this platform, if one exists
fn config_file_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_FILE_ENV) {
        let path = PathBuf::from(explicit);
        if path.exists() {
            return Some(path);
        }
        warn!("{} points at missing file: {}", CONFIG_FILE_ENV, path.display());
        return None;
    }

    let user_config = dirs::config_dir().map(|d| d.join("fitlog").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/fitlog/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fitlog"))
        .unwrap_or_else(|| PathBuf::from("./fitlog_data"))
}

/// Resolves the root folder following the priority order above
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
    config: Option<TomlConfig>,
}

impl RootFolderResolver {
    /// Create a resolver that consults the platform config file
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
            config: TomlConfig::load_default(),
        }
    }

    /// Use an already-loaded config instead of searching for one
    pub fn with_config(mut self, config: Option<TomlConfig>) -> Self {
        self.config = config;
        self
    }

    pub fn with_cli_arg(mut self, cli_arg: Option<PathBuf>) -> Self {
        self.cli_arg = cli_arg;
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            debug!("[{}] root folder from command line", self.module_name);
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.is_empty() {
                debug!("[{}] root folder from {}", self.module_name, ROOT_FOLDER_ENV);
                return PathBuf::from(path);
            }
        }

        if let Some(path) = self.config.as_ref().and_then(|c| c.root_folder.clone()) {
            debug!("[{}] root folder from config file", self.module_name);
            return path;
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Prepares the root folder and names the files kept inside it
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder (and parents) if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    pub fn programs_path(&self) -> PathBuf {
        self.root_folder.join(PROGRAMS_FILE)
    }
}

/// Effective HTTP server settings after merging config file and defaults
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub session_ttl: chrono::Duration,
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_toml(config: Option<&TomlConfig>) -> Self {
        let defaults = CompiledDefaults::for_current_platform();
        let ttl_hours = config
            .and_then(|c| c.session_ttl_hours)
            .filter(|h| *h > 0)
            .unwrap_or(defaults.session_ttl_hours);

        Self {
            host: config
                .and_then(|c| c.host.clone())
                .unwrap_or(defaults.host),
            port: config.and_then(|c| c.port).unwrap_or(defaults.port),
            session_ttl: chrono::Duration::hours(ttl_hours),
            log_level: config
                .map(|c| c.logging.level.clone())
                .unwrap_or(defaults.log_level),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_toml(None)
    }
}
