use thiserror::Error;

/// Errors that can occur while loading, curating or exporting menu data
#[derive(Error, Debug)]
pub enum MenuError {
    /// A bundled data file is missing or unreadable
    #[error("Failed to load data file {path}: {reason}")]
    LoadError { path: String, reason: String },

    /// Failed to (de)serialize menu data
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Filesystem failure outside of the initial load
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to reach the scrape service
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The scrape service answered but could not produce a recipe
    #[error("Scrape failed: {0}")]
    ScrapeError(String),

    /// An item id that does not belong to the collection
    #[error("Unknown menu item id: {0}")]
    UnknownItem(usize),

    /// A date that could not be understood where one is required
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A selection or command that cannot be carried out
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
