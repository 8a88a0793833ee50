//! Errors from loading a table.

use thiserror::Error;

/// A manifest or row set that could not be turned into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The manifest failed to parse, validate or build.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] crate::yaml::ParseError),

    /// The rows are not a JSON array of objects with an id.
    #[error("invalid rows: {0}")]
    Rows(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_from_rows() {
        let err: LoadError = serde_json::from_str::<Vec<i64>>("nope").unwrap_err().into();
        assert!(matches!(err, LoadError::Rows(_)));
        assert!(err.to_string().starts_with("invalid rows: "));
    }
}
