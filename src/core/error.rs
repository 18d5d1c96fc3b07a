// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for piggyback
//!
//! A single error enum covers the execution framework and the statistics
//! collector.

use thiserror::Error;

/// Result type alias for piggyback operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Catalog errors
    // =========================================================================
    /// Table not found in the catalog
    #[error("table '{0}' not found")]
    TableNotFound(String),

    /// Table already registered under this name
    #[error("table '{0}' already exists")]
    TableAlreadyExists(String),

    /// Row width does not match the table schema
    #[error("table columns don't match, expected {expected}, got {got}")]
    TableColumnsNotMatch { expected: usize, got: usize },

    /// NOT NULL constraint violation
    #[error("not null constraint failed for column {column}")]
    NotNullConstraint { column: String },

    /// Value type does not match the declared column type
    #[error("type mismatch for column {column}: expected {expected}, got {got}")]
    ColumnTypeMismatch {
        column: String,
        expected: String,
        got: String,
    },

    // =========================================================================
    // Execution errors
    // =========================================================================
    /// Column index out of bounds
    #[error("column index {index} out of bounds")]
    ColumnIndexOutOfBounds { index: usize },

    /// Operator used before open() or after close()
    #[error("operator '{0}' is not open")]
    OperatorNotOpen(String),

    /// Query cancelled
    #[error("query cancelled")]
    QueryCancelled,

    // =========================================================================
    // Statistics session errors
    // =========================================================================
    /// A statistics session is already live on this collector
    #[error("statistics session already active for plan node {root}")]
    SessionAlreadyActive { root: u32 },

    /// The root produced a row whose width differs from its schema
    #[error("root row has {got} columns, expected {expected}")]
    RowWidthMismatch { expected: usize, got: usize },

    /// Memory for a statistics buffer could not be reserved
    #[error("out of memory while {context}")]
    OutOfMemory { context: String },

    // =========================================================================
    // Other errors
    // =========================================================================
    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Internal error for unexpected conditions
    #[error("{message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new TableColumnsNotMatch error
    pub fn table_columns_not_match(expected: usize, got: usize) -> Self {
        Error::TableColumnsNotMatch { expected, got }
    }

    /// Create a new NotNullConstraint error
    pub fn not_null_constraint(column: impl Into<String>) -> Self {
        Error::NotNullConstraint {
            column: column.into(),
        }
    }

    /// Create a new ColumnTypeMismatch error
    pub fn column_type_mismatch(
        column: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Error::ColumnTypeMismatch {
            column: column.into(),
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create a new OutOfMemory error
    pub fn out_of_memory(context: impl Into<String>) -> Self {
        Error::OutOfMemory {
            context: context.into(),
        }
    }

    /// Create a new Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Create a new Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Create a new InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::TableNotFound(_) | Error::ColumnIndexOutOfBounds { .. }
        )
    }

    /// Check if this is a constraint violation error
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::NotNullConstraint { .. }
                | Error::ColumnTypeMismatch { .. }
                | Error::TableColumnsNotMatch { .. }
        )
    }

    /// Check if the framework or the collector was driven incorrectly
    ///
    /// These indicate a programming error in the caller rather than a data
    /// or resource problem.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::SessionAlreadyActive { .. }
                | Error::RowWidthMismatch { .. }
                | Error::OperatorNotOpen(_)
        )
    }

    /// Check if the error aborts the whole query
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::OutOfMemory { .. } | Error::QueryCancelled | Error::Internal { .. }
        )
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(err: std::collections::TryReserveError) -> Self {
        Error::OutOfMemory {
            context: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::TableNotFound("albums".to_string()).to_string(),
            "table 'albums' not found"
        );
        assert_eq!(
            Error::SessionAlreadyActive { root: 4 }.to_string(),
            "statistics session already active for plan node 4"
        );
        assert_eq!(
            Error::RowWidthMismatch {
                expected: 3,
                got: 2
            }
            .to_string(),
            "root row has 2 columns, expected 3"
        );
        assert_eq!(
            Error::out_of_memory("building pair combination").to_string(),
            "out of memory while building pair combination"
        );
        assert_eq!(Error::QueryCancelled.to_string(), "query cancelled");
    }

    #[test]
    fn test_structured_error_display() {
        let err = Error::table_columns_not_match(5, 3);
        assert_eq!(
            err.to_string(),
            "table columns don't match, expected 5, got 3"
        );

        let err = Error::column_type_mismatch("tracks", "INTEGER", "TEXT");
        assert_eq!(
            err.to_string(),
            "type mismatch for column tracks: expected INTEGER, got TEXT"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::TableNotFound("t".to_string()).is_not_found());
        assert!(!Error::QueryCancelled.is_not_found());

        assert!(Error::not_null_constraint("c").is_constraint_violation());
        assert!(!Error::QueryCancelled.is_constraint_violation());

        assert!(Error::SessionAlreadyActive { root: 1 }.is_usage_error());
        assert!(!Error::out_of_memory("x").is_usage_error());

        assert!(Error::out_of_memory("x").is_fatal());
        assert!(Error::QueryCancelled.is_fatal());
        assert!(!Error::SessionAlreadyActive { root: 1 }.is_fatal());
    }

    #[test]
    fn test_try_reserve_conversion() {
        let mut buf = String::new();
        let err: Error = buf.try_reserve(usize::MAX).unwrap_err().into();
        assert!(matches!(err, Error::OutOfMemory { .. }));
    }
}
