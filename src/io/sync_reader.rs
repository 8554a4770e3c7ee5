//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over transaction records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<Transaction, FraudError>` for each CSV row:
//!
//! ```no_run
//! use card_fraud_screener::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("transactions.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(transaction) => println!("Read transaction: {:?}", transaction),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants with line numbers
//! - `read_all()` stops at the first bad record: a batch is screened whole or
//!   not at all

use crate::core::TransactionSet;
use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{FraudError, Transaction};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
}

/// Map an open failure to the matching error variant
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> FraudError {
    if error.kind() == ErrorKind::NotFound {
        FraudError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        FraudError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        }
    }
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// * `FraudError::FileNotFound` if the file does not exist
    /// * `FraudError::IoError` if it exists but cannot be opened
    /// * `FraudError::MalformedRecord` if the header row cannot be read
    pub fn new(path: &Path) -> Result<Self, FraudError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .buffer_capacity(8 * 1024)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        Ok(Self { reader, headers })
    }

    /// Read every record into a validated transaction set
    ///
    /// # Errors
    ///
    /// The first malformed record, or a duplicate transaction ID.
    pub fn read_all(self) -> Result<TransactionSet, FraudError> {
        let transactions = self.collect::<Result<Vec<_>, _>>()?;
        TransactionSet::new(transactions)
    }
}

impl Iterator for SyncReader {
    type Item = Result<Transaction, FraudError>;

    /// Get the next transaction from the CSV file
    ///
    /// Errors carry the physical line the record starts on, counting the
    /// header as line 1.
    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(e.into())),
        }

        let line = record.position().map(|pos| pos.line());
        let result = record
            .deserialize::<CsvRecord>(Some(&self.headers))
            .map_err(FraudError::from)
            .and_then(convert_csv_record);

        Some(result.map_err(|e| match line {
            Some(line) => e.at_line(line),
            None => e,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "Transaction_ID,Card_Number,Timestamp,Amount,Latitude,Longitude,Country,Device_ID,Failed_Auth\n";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes())
            .expect("Failed to write to temp file");
        file.write_all(rows.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(matches!(result, Err(FraudError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_reader_iterates_records() {
        let file = create_temp_csv(
            "T1,4111,2024-03-15 10:00:00,120.50,40.7128,-74.0060,USA,iPhone 13,0\n\
             T2,4111,2024-03-15 11:00:00,80,40.7306,-73.9352,USA,iPhone 13,1\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 2);
        let first = records[0].as_ref().unwrap();
        assert_eq!(first.transaction_id, "T1");
        assert_eq!(first.card_number, "4111");
        assert_eq!(first.failed_auth, 0);
        assert_eq!(records[1].as_ref().unwrap().failed_auth, 1);
    }

    #[test]
    fn test_sync_reader_handles_whitespace_and_extra_columns() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"Transaction_ID,Card_Number,Timestamp,Amount,Latitude,Longitude,Country,Device_ID,Failed_Auth,Merchant\n\
              \x20T1 , 4111 , 2024-03-15 10:00:00 , 120.50 , 40.7 , -74.0 , USA , iPhone 13 , 0 , Cafe\n",
        )
        .unwrap();
        file.flush().unwrap();

        let set = SyncReader::new(file.path()).unwrap().read_all().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice()[0].transaction_id, "T1");
        assert_eq!(set.as_slice()[0].device_id, "iPhone 13");
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let file = create_temp_csv(
            "T1,4111,2024-03-15 10:00:00,120.50,40.7,-74.0,USA,iPhone 13,0\n\
             T2,4111,not-a-time,80,40.7,-74.0,USA,iPhone 13,0\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert!(records[0].is_ok());
        let error = records[1].as_ref().unwrap_err();
        assert!(matches!(
            error,
            FraudError::MalformedRecord { line: Some(3), .. }
        ));
    }

    #[test]
    fn test_sync_reader_counts_lines_inside_quoted_fields() {
        let file = create_temp_csv(
            "T1,4111,2024-03-15 10:00:00,120.50,40.7,-74.0,\"United\nStates\",iPhone 13,0\n\
             T2,4111,2024-03-15 11:00:00,abc,40.7,-74.0,USA,iPhone 13,0\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records[0].as_ref().unwrap().country, "United\nStates");
        assert!(matches!(
            records[1],
            Err(FraudError::MalformedRecord { line: Some(4), .. })
        ));
    }

    #[test]
    fn test_read_all_rejects_batch_with_malformed_record() {
        let file = create_temp_csv(
            "T1,4111,2024-03-15 10:00:00,120.50,40.7,-74.0,USA,iPhone 13,0\n\
             T2,4111,2024-03-15 10:00:00,abc,40.7,-74.0,USA,iPhone 13,0\n\
             T3,4111,2024-03-15 10:00:00,10,40.7,-74.0,USA,iPhone 13,0\n",
        );

        let result = SyncReader::new(file.path()).unwrap().read_all();
        assert!(matches!(
            result,
            Err(FraudError::MalformedRecord { line: Some(3), .. })
        ));
    }

    #[test]
    fn test_read_all_rejects_non_numeric_failed_auth() {
        let file = create_temp_csv(
            "T1,4111,2024-03-15 10:00:00,1,40.7,-74.0,USA,iPhone 13,-1\n",
        );

        let result = SyncReader::new(file.path()).unwrap().read_all();
        assert!(matches!(result, Err(FraudError::MalformedRecord { .. })));
    }

    #[test]
    fn test_read_all_rejects_duplicate_ids() {
        let file = create_temp_csv(
            "T1,4111,2024-03-15 10:00:00,1,40.7,-74.0,USA,iPhone 13,0\n\
             T1,4222,2024-03-15 11:00:00,2,40.7,-74.0,USA,iPhone 13,0\n",
        );

        let result = SyncReader::new(file.path()).unwrap().read_all();
        assert_eq!(result, Err(FraudError::duplicate_transaction("T1")));
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("");
        let set = SyncReader::new(file.path()).unwrap().read_all().unwrap();
        assert!(set.is_empty());
    }
}
