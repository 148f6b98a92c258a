//! Error types for the CLI

use std::path::PathBuf;

use sheetpol_compiler::ExtractError;

/// CLI Result type
pub type Result<T> = std::result::Result<T, Error>;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wrong arguments, or an explicit `--help` / `--version` request
    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook has no worksheets: {path}")]
    EmptyWorkbook { path: PathBuf },

    #[error("render error: {0}")]
    Render(#[from] sheetpol_common::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn workbook(path: impl Into<PathBuf>, source: calamine::Error) -> Self {
        Error::Workbook {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error. Help and version output are not
    /// failures.
    pub fn exit_status(&self) -> u8 {
        match self {
            Error::Usage(err) if !err.use_stderr() => 0,
            _ => 1,
        }
    }
}
