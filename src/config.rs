use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Directory holding the bundled data files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Desktop store directory; overrides bundled menus and items when populated
    #[serde(default)]
    pub app_data_dir: Option<PathBuf>,
    /// Directory that exported markdown files are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Scrape service configuration
    #[serde(default)]
    pub scraper: ScraperConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            app_data_dir: None,
            export_dir: default_export_dir(),
            scraper: ScraperConfig::default(),
        }
    }
}

/// Configuration for the external scrape service
#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// Base URL of the scrape service (scraping is unavailable when unset)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with scrape requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "MenuMaker Desktop/0.1".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MENUMAKER__ prefix
    /// 2. menumaker.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MENUMAKER__SCRAPER__ENDPOINT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("menumaker").required(false))
        // Use double underscore for nested: MENUMAKER__SCRAPER__TIMEOUT
        .add_source(
            Environment::with_prefix("MENUMAKER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
