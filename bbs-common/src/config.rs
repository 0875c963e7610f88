//! Configuration loading and root folder resolution
//!
//! Bootstrap settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or malformed TOML file never stops startup: it is logged and
//! the compiled defaults are used.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "BBS_ROOT_FOLDER";

/// Environment variable overriding the config file location
pub const CONFIG_FILE_ENV: &str = "BBS_CONFIG";

/// Default storefront HTTP port
pub const DEFAULT_PORT: u16 = 5750;

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "bbs.db";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Folder holding the storage database
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON catalog replacing the built-in one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            port: DEFAULT_PORT,
            catalog_path: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
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

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load the config file if one exists, falling back to defaults
    ///
    /// Looks at `$BBS_CONFIG` first, then the platform config file. Nothing
    /// is logged here: the returned [`ConfigSource`] is reported with
    /// [`ConfigSource::log`] once the log subscriber, which depends on the
    /// configured level, is installed.
    pub fn load_or_default() -> (Self, ConfigSource) {
        let path = match std::env::var_os(CONFIG_FILE_ENV) {
            Some(path) => PathBuf::from(path),
            None => match default_config_file() {
                Some(path) => path,
                None => return (Self::default(), ConfigSource::Defaults),
            },
        };

        if !path.exists() {
            return (Self::default(), ConfigSource::Missing(path));
        }

        match Self::from_file(&path) {
            Ok(config) => (config, ConfigSource::Loaded(path)),
            Err(e) => (Self::default(), ConfigSource::Invalid(path, e)),
        }
    }
}

/// Where the active [`TomlConfig`] came from
#[derive(Debug)]
pub enum ConfigSource {
    /// No config location on this platform
    Defaults,
    /// No file at the expected path
    Missing(PathBuf),
    Loaded(PathBuf),
    /// File present but unreadable or malformed; defaults are in use
    Invalid(PathBuf, Error),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => info!("No config directory, using defaults"),
            ConfigSource::Missing(path) => {
                info!("No config file at {}, using defaults", path.display())
            }
            ConfigSource::Loaded(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Invalid(_, e) => warn!("Ignoring config file: {}", e),
        }
    }
}

/// Platform config file: `<config dir>/bbs/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bbs").join("config.toml"))
}

/// Resolves the root folder from CLI, environment, TOML and defaults
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_value: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new() -> Self {
        Self {
            cli_arg: None,
            toml_value: None,
        }
    }

    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    pub fn with_toml(mut self, config: &TomlConfig) -> Self {
        self.toml_value = config.root_folder.clone();
        self
    }

    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        // Priority 2: Environment variable
        if let Some(path) = std::env::var_os(ROOT_FOLDER_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        // Priority 3: TOML config file
        if let Some(path) = &self.toml_value {
            return path.clone();
        }

        // Priority 4: OS-dependent compiled default
        default_root_folder()
    }
}

impl Default for RootFolderResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the root folder and locates files inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/bbs
        dirs::data_local_dir()
            .map(|d| d.join("bbs"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/bbs"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/bbs
        dirs::data_dir()
            .map(|d| d.join("bbs"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/bbs"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\bbs
        dirs::data_local_dir()
            .map(|d| d.join("bbs"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\bbs"))
    } else {
        PathBuf::from("./bbs_data")
    }
}
