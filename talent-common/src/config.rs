//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration only. Sources, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "TALENT_ROOT_FOLDER";

/// HTTP port when neither CLI, environment nor TOML set one
pub const DEFAULT_PORT: u16 = 5000;

/// Spreadsheet file name inside the root folder
pub const DEFAULT_DATA_FILE: &str = "data.xlsx";

/// Worksheet holding the candidate table
pub const DEFAULT_SHEET_NAME: &str = "Candidates";

/// Credential database path relative to the root folder
pub const DEFAULT_USER_DB: &str = "instance/users.db";

/// Account seeded on first startup
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";

/// Session lifetime measured from last activity
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 86_400;

/// Bootstrap configuration loaded from TOML file
///
/// Every key is optional. Relative paths are resolved against the root folder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the spreadsheet and the credential database
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Candidate spreadsheet (default `data.xlsx`)
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Worksheet name (default `Candidates`)
    #[serde(default)]
    pub sheet_name: Option<String>,

    /// Credential database (default `instance/users.db`)
    #[serde(default)]
    pub user_db: Option<PathBuf>,

    #[serde(default)]
    pub session_ttl_seconds: Option<u64>,

    /// Password for the seeded admin account
    #[serde(default)]
    pub admin_password: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
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

fn default_log_level() -> String {
    "info".to_string()
}

/// Fully resolved configuration handed to the server
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root_folder: PathBuf,
    pub data_file: PathBuf,
    pub sheet_name: String,
    pub user_db: PathBuf,
    pub session_ttl: Duration,
    pub admin_username: String,
    pub admin_password: String,
    pub log_level: String,
}

impl AppConfig {
    /// All defaults, rooted at `root_folder`
    pub fn for_root(root_folder: impl Into<PathBuf>) -> Self {
        Self::from_toml(root_folder.into(), &TomlConfig::default())
    }

    /// Resolve the root folder by priority, then apply TOML overrides
    pub fn resolve(cli_root: Option<&Path>, toml: &TomlConfig) -> Self {
        let root_folder = resolve_root_folder(cli_root, toml);
        Self::from_toml(root_folder, toml)
    }

    fn from_toml(root_folder: PathBuf, toml: &TomlConfig) -> Self {
        let data_file = root_folder.join(
            toml.data_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        );
        let user_db = root_folder.join(
            toml.user_db
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_USER_DB)),
        );

        Self {
            data_file,
            user_db,
            sheet_name: toml
                .sheet_name
                .clone()
                .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            session_ttl: Duration::from_secs(
                toml.session_ttl_seconds
                    .unwrap_or(DEFAULT_SESSION_TTL_SECONDS),
            ),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: toml
                .admin_password
                .clone()
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            log_level: toml.logging.level.clone(),
            root_folder,
        }
    }
}

/// Load the TOML bootstrap file
///
/// A missing or malformed file is never fatal: a warning is logged and
/// defaults are returned.
pub fn load_toml_config(explicit_path: Option<&Path>) -> TomlConfig {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                info!("No config file found, using defaults");
                return TomlConfig::default();
            }
        },
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read config file {}: {}", path.display(), e);
            return TomlConfig::default();
        }
    };

    match toml::from_str::<TomlConfig>(&content) {
        Ok(config) => {
            info!("Loaded config file: {}", path.display());
            config
        }
        Err(e) => {
            warn!("Invalid config file {}: {} (using defaults)", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// Platform config location: `<config_dir>/talent/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("talent").join("config.toml"))
}

/// Root folder resolution by priority order
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("talent"))
        .unwrap_or_else(|| PathBuf::from("./talent_data"))
}
