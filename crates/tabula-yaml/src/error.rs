//! Error types for manifest parsing.

use std::fmt;

/// Error type for manifest parsing and validation.
#[derive(Debug)]
pub enum ParseError {
    /// YAML parsing error
    Yaml(serde_yaml_ng::Error),
    /// Validation error
    Validation(String),
    /// A key refers to an undeclared column
    UnknownColumn(String),
    /// Invalid value
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml(e) => write!(f, "YAML error: {e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::UnknownColumn(key) => write!(f, "Unknown column: {key}"),
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for ParseError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Self::Yaml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnknownColumn("status".to_string());
        assert_eq!(err.to_string(), "Unknown column: status");

        let err = ParseError::InvalidValue {
            field: "columns[2].format.places".to_string(),
            message: "must be at most 20".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'columns[2].format.places': must be at most 20"
        );

        let err = ParseError::Validation("duplicate column key: id".to_string());
        assert_eq!(err.to_string(), "Validation error: duplicate column key: id");
    }

    #[test]
    fn test_parse_error_source() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("[").unwrap_err();
        let err = ParseError::from(yaml_err);
        assert!(err.to_string().starts_with("YAML error:"));
        assert!(err.source().is_some());
        assert!(ParseError::Validation(String::new()).source().is_none());
    }
}
