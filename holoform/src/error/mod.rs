//! Error types and error handling

use thiserror::Error;

/// Result alias used throughout holoform
pub type Result<T, E = HoloFormError> = std::result::Result<T, E>;

/// Library error type
#[derive(Debug, Error)]
pub enum HoloFormError {
    /// The database driver behind a connection is not one the mapper can introspect
    #[error("Driver '{driver}' not supported. Supported drivers: {}", .supported.join(", "))]
    UnsupportedDriver {
        /// Driver name as found in the connection URL
        driver: String,
        /// Drivers the schema introspection supports
        supported: Vec<String>,
    },

    /// A column's declared SQL type has no input kind mapping
    #[error("No input kind defined for SQL type '{sql_type}'")]
    UnsupportedType {
        /// The raw SQL type string of the offending column
        sql_type: String,
    },

    /// A resubmission referenced a field the form never registered
    #[error("Unknown field '{field_id}'")]
    UnknownField {
        /// Field identifier missing from the form
        field_id: String,
    },

    /// A schema snapshot was asked about a table it did not capture
    #[error("Unknown table '{table}'")]
    UnknownTable {
        /// Table name that was requested
        table: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
