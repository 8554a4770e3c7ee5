//! Error types for the card fraud screener
//!
//! This module defines all error types that can occur while loading a batch,
//! screening it and writing the report. Errors are designed to be descriptive
//! and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Record Errors**: Malformed rows and duplicate transaction IDs. Either one
//!   rejects the whole batch before any detector runs.
//! - **Output Errors**: The report could not be written
//! - **Runtime Errors**: The async runtime failed to start or a detector task died
//!
//! Degenerate data (empty batch, single-transaction cards, constant amounts)
//! is never an error; detectors simply return no findings.

use thiserror::Error;

/// Main error type for the fraud screener
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FraudError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A row is missing a required field or holds a value of the wrong shape
    ///
    /// Fatal for the batch: detectors assume a fully validated dataset.
    #[error("Malformed record{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedRecord {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// The same transaction ID appears more than once in the batch
    #[error("Duplicate transaction ID {tx}")]
    DuplicateTransactionId {
        /// Transaction ID that is duplicated
        tx: String,
    },

    /// The report could not be written
    #[error("Output error: {message}")]
    OutputError {
        /// Description of the write failure
        message: String,
    },

    /// The async runtime could not be built or a detector task failed
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the runtime failure
        message: String,
    },
}

// Conversion from io::Error to FraudError
impl From<std::io::Error> for FraudError {
    fn from(error: std::io::Error) -> Self {
        FraudError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to FraudError
impl From<csv::Error> for FraudError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        FraudError::MalformedRecord {
            line,
            message: error.to_string(),
        }
    }
}

// Conversion from csv_async::Error to FraudError
impl From<csv_async::Error> for FraudError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        FraudError::MalformedRecord {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl FraudError {
    /// Create a MalformedRecord error
    pub fn malformed(line: Option<u64>, message: impl Into<String>) -> Self {
        FraudError::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Create a DuplicateTransactionId error
    pub fn duplicate_transaction(tx: &str) -> Self {
        FraudError::DuplicateTransactionId { tx: tx.to_string() }
    }

    /// Create an OutputError
    pub fn output(message: impl Into<String>) -> Self {
        FraudError::OutputError {
            message: message.into(),
        }
    }

    /// Create a RuntimeError
    pub fn runtime(message: impl Into<String>) -> Self {
        FraudError::RuntimeError {
            message: message.into(),
        }
    }

    /// Attach a line number to a MalformedRecord that does not have one yet
    pub fn at_line(self, line: u64) -> Self {
        match self {
            FraudError::MalformedRecord {
                line: None,
                message,
            } => FraudError::MalformedRecord {
                line: Some(line),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        FraudError::FileNotFound { path: "test.csv".to_string() },
        "File not found: test.csv"
    )]
    #[case::io_error(
        FraudError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::malformed_with_line(
        FraudError::MalformedRecord { line: Some(42), message: "Invalid amount".to_string() },
        "Malformed record at line 42: Invalid amount"
    )]
    #[case::malformed_without_line(
        FraudError::MalformedRecord { line: None, message: "Invalid amount".to_string() },
        "Malformed record: Invalid amount"
    )]
    #[case::duplicate_transaction(
        FraudError::DuplicateTransactionId { tx: "T7".to_string() },
        "Duplicate transaction ID T7"
    )]
    #[case::output_error(
        FraudError::OutputError { message: "broken pipe".to_string() },
        "Output error: broken pipe"
    )]
    #[case::runtime_error(
        FraudError::RuntimeError { message: "task panicked".to_string() },
        "Runtime error: task panicked"
    )]
    fn test_error_display(#[case] error: FraudError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::malformed(
        FraudError::malformed(Some(3), "bad"),
        FraudError::MalformedRecord { line: Some(3), message: "bad".to_string() }
    )]
    #[case::duplicate(
        FraudError::duplicate_transaction("T1"),
        FraudError::DuplicateTransactionId { tx: "T1".to_string() }
    )]
    #[case::output(
        FraudError::output("disk full"),
        FraudError::OutputError { message: "disk full".to_string() }
    )]
    fn test_helper_functions(#[case] result: FraudError, #[case] expected: FraudError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_at_line_fills_missing_line_only() {
        let error = FraudError::malformed(None, "bad").at_line(5);
        assert_eq!(error, FraudError::malformed(Some(5), "bad"));

        let error = FraudError::malformed(Some(2), "bad").at_line(5);
        assert_eq!(error, FraudError::malformed(Some(2), "bad"));

        let error = FraudError::duplicate_transaction("T1").at_line(5);
        assert_eq!(error, FraudError::duplicate_transaction("T1"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: FraudError = io_error.into();
        assert!(matches!(error, FraudError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
