//! Error types for table operations.

use thiserror::Error;

/// Errors produced by table utilities and model construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// CSV conversion received zero rows.
    #[error("cannot convert empty input to CSV")]
    EmptyInput,

    /// Two columns in a model share a key.
    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),

    /// A key refers to a column the model does not declare.
    #[error("unknown column key: {0}")]
    UnknownColumn(String),

    /// A record could not be read as a row.
    #[error("invalid row: {0}")]
    InvalidRow(String),

    /// The host refused or failed to save a file.
    #[error("save failed: {0}")]
    Save(#[from] SaveError),
}

/// Errors reported by a [`FileSaver`](crate::FileSaver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// No save mechanism exists in this environment.
    #[error("file saving not available")]
    NotAvailable,

    /// Writing the file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The host rejected the save request.
    #[error("save rejected: {0}")]
    Rejected(String),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
