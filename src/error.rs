//! Error types for csv-fixtures
//!
//! Every failure in the generation pipeline is surfaced as a [`FixtureError`]
//! and propagated with `?`; a run stops at the first error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fixture generation
#[derive(Error, Debug)]
pub enum FixtureError {
    /// File I/O error without path context
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// File I/O error on a known path
    #[error("Failed to access {}: {source}", .path.display())]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// CSV record serialization error
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dialect rejected before writing
    #[error("Invalid dialect: {0}")]
    InvalidDialect(String),

    /// `--only` names a fixture missing from the catalog
    #[error("Unknown fixture '{name}'")]
    UnknownFixture { name: String },

    /// Columns of a frame disagree on length
    #[error("Column '{column}' has {actual} rows but the frame has {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Column type the writer cannot render
    #[error("Column '{column}' has unsupported type {dtype}")]
    UnsupportedColumn { column: String, dtype: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for fixture operations
pub type Result<T> = std::result::Result<T, FixtureError>;

impl FixtureError {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixtureError::PathIo {
            path: path.into(),
            source,
        }
    }

    /// Get a user-friendly error message suitable for the terminal
    pub fn user_message(&self) -> String {
        match self {
            FixtureError::FileIo(e) => format!("File error: {}", e),
            FixtureError::PathIo { path, source } => {
                format!("File error on {}: {}", path.display(), source)
            }
            FixtureError::Polars(e) => format!("Data error: {}", e),
            FixtureError::Csv(e) => format!("CSV error: {}", e),
            FixtureError::Config(msg) => format!("Config error: {}", msg),
            FixtureError::InvalidDialect(msg) => format!("Dialect error: {}", msg),
            FixtureError::UnknownFixture { name } => format!("No fixture named '{}'", name),
            FixtureError::ShapeMismatch {
                column,
                expected,
                actual,
            } => format!(
                "Column '{}' has {} rows, expected {}",
                column, actual, expected
            ),
            FixtureError::UnsupportedColumn { column, dtype } => {
                format!("Cannot write column '{}' of type {}", column, dtype)
            }
            FixtureError::Json(e) => format!("JSON error: {}", e),
        }
    }

    /// Get a short title for the error (used as a log category)
    pub fn title(&self) -> &'static str {
        match self {
            FixtureError::FileIo(_) | FixtureError::PathIo { .. } => "File Error",
            FixtureError::Polars(_) => "Data Error",
            FixtureError::Csv(_) => "CSV Error",
            FixtureError::Config(_) => "Configuration Error",
            FixtureError::InvalidDialect(_) => "Invalid Dialect",
            FixtureError::UnknownFixture { .. } => "Unknown Fixture",
            FixtureError::ShapeMismatch { .. } => "Shape Mismatch",
            FixtureError::UnsupportedColumn { .. } => "Unsupported Column",
            FixtureError::Json(_) => "JSON Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FixtureError::UnknownFixture {
            name: "sincos2".to_string(),
        };
        assert_eq!(err.user_message(), "No fixture named 'sincos2'");
        assert_eq!(err.title(), "Unknown Fixture");

        let err = FixtureError::ShapeMismatch {
            column: "count".to_string(),
            expected: 20,
            actual: 19,
        };
        assert_eq!(err.user_message(), "Column 'count' has 19 rows, expected 20");
        assert_eq!(err.title(), "Shape Mismatch");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let fixture_err: FixtureError = io_err.into();
        assert!(matches!(fixture_err, FixtureError::FileIo(_)));

        let err = FixtureError::io("out/sincos.csv", std::io::Error::other("disk full"));
        assert_eq!(err.title(), "File Error");
        assert!(err.to_string().contains("out/sincos.csv"));
    }
}
