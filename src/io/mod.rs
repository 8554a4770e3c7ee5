//! I/O module
//!
//! Handles CSV loading and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record validation, report serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_csv_record, parse_timestamp, write_report_csv, CsvRecord, ReportScope,
};
pub use sync_reader::SyncReader;
