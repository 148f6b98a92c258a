//! Error types for the rule compiler

use thiserror::Error;

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Fatal problems with the shape of the input grid
///
/// Malformed rule rows are not errors; they flow into the output as written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The namespace cell (row 2, column A) has no `label:namespace` form
    #[error("namespace not found in the second row: expected 'namespace: <name>' in cell A2, found {cell:?}")]
    MissingNamespace {
        /// Trimmed content of the namespace cell
        cell: String,
    },
}

impl ExtractError {
    pub fn missing_namespace(cell: impl Into<String>) -> Self {
        ExtractError::MissingNamespace { cell: cell.into() }
    }
}
