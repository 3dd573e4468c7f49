// SPDX-License-Identifier: MIT

//! Typed error handling for decision-rs
//!
//! Only loading and context conversion can fail. Rule evaluation itself is
//! total and reports "no match" instead of an error.

use thiserror::Error;

/// Top-level error type for decision-rs
#[derive(Debug, Error)]
pub enum DecisionError {
    /// A rule table could not be loaded
    #[error("Failed to load table '{table}': {source}")]
    Load {
        table: String,
        #[source]
        source: LoadError,
    },

    /// No table registered under the requested name
    #[error("Table '{name}' not found")]
    TableNotFound { name: String },

    /// Context values could not be converted
    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    /// Configuration errors (bad flags, unreadable directories)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Structural problems in a table source. These are fatal: no `RuleTable`
/// is produced from a source that raises one.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source has no header row
    #[error("Missing header row")]
    MissingHeader,

    /// The header has no `*` column separating inputs from outputs
    #[error("Header has no '*' separator column")]
    MissingSeparator,

    /// A data row does not have one cell per header column
    #[error("Line {line}: expected {expected} cells, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A quoted field is never closed
    #[error("Line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },

    /// I/O errors while reading the source
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML rule documents that do not match the expected shape
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Problems turning external data into context values
#[derive(Debug, Error)]
pub enum ContextError {
    /// Only booleans, numbers and strings can live in a context
    #[error("Unsupported value for '{key}': only booleans, numbers and strings are allowed")]
    UnsupportedValue { key: String },

    /// The context document is not a key/value object
    #[error("Context must be a JSON object")]
    NotAnObject,

    /// A `key=value` assignment without the `=`
    #[error("Invalid assignment '{0}', expected key=value")]
    InvalidAssignment(String),
}

/// A condition expression whose operator could not be recognised.
///
/// Never escapes evaluation; it only explains why a condition was treated as
/// not satisfied.
#[derive(Debug, Error, PartialEq)]
pub enum ConditionError {
    #[error("Unknown operator in condition '{0}'")]
    UnknownOperator(String),
}

impl DecisionError {
    /// Create a load error for a named table
    pub fn load(table: impl Into<String>, source: LoadError) -> Self {
        Self::Load {
            table: table.into(),
            source,
        }
    }

    /// Create a table not found error
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Self::TableNotFound { name: name.into() }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_length_message() {
        let err = LoadError::RowLength {
            line: 3,
            expected: 4,
            found: 2,
        };
        assert_eq!(err.to_string(), "Line 3: expected 4 cells, found 2");
    }

    #[test]
    fn test_load_error_names_table() {
        let err = DecisionError::load("loans", LoadError::MissingSeparator);
        assert_eq!(
            err.to_string(),
            "Failed to load table 'loans': Header has no '*' separator column"
        );
    }

    #[test]
    fn test_context_error_converts() {
        let err: DecisionError = ContextError::NotAnObject.into();
        assert!(matches!(err, DecisionError::Context(_)));
    }
}
