//! Configuration for the fact board client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/til/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

mod logging;
mod serialization;


pub use logging::{FileLogging, LogRotation, LoggingConfig};

use crate::store::rest::RestConfig;
use crate::store::DEFAULT_FETCH_LIMIT;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Hosted project URL (the REST endpoint lives under `/rest/v1`)
    pub store_url: String,

    /// Public project key; `None` until provided by env or file
    pub api_key: Option<String>,

    /// Table holding the facts
    pub table: String,

    /// Cap on rows fetched per list query
    pub fetch_limit: usize,

    /// Request timeout in seconds; 0 keeps the transport default
    pub request_timeout_secs: u64,

    /// Color theme: "dark" or "light"
    pub theme: String,

    /// Run against the in-memory demo store instead of the hosted table
    pub demo_mode: bool,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: String::new(),
            api_key: None,
            table: "facts".to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            request_timeout_secs: 0,
            theme: "dark".to_string(),
            demo_mode: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub store_url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub fetch_limit: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/til/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("til").join("config.toml"))
    }

    /// Write a default config file on first run so users can find the options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        // Config is optional; a read-only home just means defaults
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be read or parsed, so a
    /// typo never silently turns into defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Run `til config --reset` to start over.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env > file > defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources<F>(file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_url = env("TIL_STORE_URL")
            .or(file.store_url)
            .unwrap_or(defaults.store_url);

        let api_key = env("TIL_API_KEY")
            .or(file.api_key)
            .filter(|k| !k.trim().is_empty());

        let table = file.table.unwrap_or(defaults.table);

        let fetch_limit = env("TIL_FETCH_LIMIT")
            .and_then(|v| v.parse().ok())
            .or(file.fetch_limit)
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.fetch_limit);

        let request_timeout_secs = file
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs);

        let theme = env("TIL_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // Runtime flag, env only
        let demo_mode = env("TIL_DEMO")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            store_url,
            api_key,
            table,
            fetch_limit,
            request_timeout_secs,
            theme,
            demo_mode,
            logging,
        }
    }

    /// Connection settings for the REST store
    pub fn rest_config(&self) -> RestConfig {
        RestConfig {
            base_url: self.store_url.clone(),
            api_key: self.api_key.clone().unwrap_or_default(),
            table: self.table.clone(),
            timeout: match self.request_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }
}
