//! Error types for the catalog engine

use thiserror::Error;

/// Result alias used across repcat-core
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading a catalog or config file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON or does not deserialize
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog data failed structural or semantic validation
    #[error("Validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config values are inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// A save-list operation was attempted without a logged-in user
    #[error("Not authenticated")]
    NotAuthenticated,
}
