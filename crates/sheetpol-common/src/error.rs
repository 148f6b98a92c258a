//! Error types for shared sheetpol utilities

use thiserror::Error;

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while rendering or reading policy documents
#[derive(Debug, Error)]
pub enum Error {
    /// Serialization or parsing of a YAML document failed
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
