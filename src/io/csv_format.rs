//! CSV format handling for transaction records and report output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Validation and conversion from CSV records to domain types
//! - Report serialization
//!
//! All functions are pure (no I/O beyond the writer they are handed) for easy
//! testing.

use crate::core::AnnotatedTransaction;
use crate::types::{FraudError, Transaction};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Format used for timestamps in reports; fractional seconds only when present
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Accepted input timestamp layouts, tried in order before RFC 3339
const INPUT_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// CSV record structure for deserialization
///
/// Matches the input CSV header: Transaction_ID, Card_Number, Timestamp,
/// Amount, Latitude, Longitude, Country, Device_ID, Failed_Auth. Extra
/// columns are ignored.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "Transaction_ID")]
    pub transaction_id: String,
    #[serde(rename = "Card_Number")]
    pub card_number: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Device_ID")]
    pub device_id: String,
    #[serde(rename = "Failed_Auth")]
    pub failed_auth: u32,
}

/// Which rows a report contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportScope {
    /// Flagged rows only, with the fraud report columns
    #[default]
    Flagged,

    /// Every row, with all input columns plus flag and reason
    All,
}

/// Parse a timestamp in any accepted layout
///
/// RFC 3339 values keep their local wall-clock time; the offset is dropped.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    INPUT_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_amount(value: &str) -> Option<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

fn require(field: &str, value: String, tx: &str) -> Result<String, FraudError> {
    if value.trim().is_empty() {
        Err(FraudError::malformed(
            None,
            format!("Missing {} for transaction '{}'", field, tx),
        ))
    } else {
        Ok(value)
    }
}

/// Convert a CsvRecord to a Transaction
///
/// This function:
/// - Requires non-empty identifiers, country and device
/// - Parses the timestamp in any accepted layout
/// - Parses the amount as a non-negative decimal
/// - Checks that coordinates are finite and within range
///
/// # Returns
///
/// * `Ok(Transaction)` - Successfully converted record
/// * `Err(FraudError::MalformedRecord)` - without a line number; readers add it
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Transaction, FraudError> {
    if csv_record.transaction_id.trim().is_empty() {
        return Err(FraudError::malformed(None, "Missing Transaction_ID"));
    }
    let tx = csv_record.transaction_id;

    let card_number = require("Card_Number", csv_record.card_number, &tx)?;
    let country = require("Country", csv_record.country, &tx)?;
    let device_id = require("Device_ID", csv_record.device_id, &tx)?;

    let timestamp = parse_timestamp(&csv_record.timestamp).ok_or_else(|| {
        FraudError::malformed(
            None,
            format!(
                "Invalid timestamp '{}' for transaction '{}'",
                csv_record.timestamp, tx
            ),
        )
    })?;

    let amount = match parse_amount(&csv_record.amount) {
        Some(amount) if !amount.is_sign_negative() || amount.is_zero() => amount,
        _ => {
            return Err(FraudError::malformed(
                None,
                format!(
                    "Invalid amount '{}' for transaction '{}'",
                    csv_record.amount, tx
                ),
            ))
        }
    };

    if !csv_record.latitude.is_finite() || !(-90.0..=90.0).contains(&csv_record.latitude) {
        return Err(FraudError::malformed(
            None,
            format!(
                "Latitude {} out of range for transaction '{}'",
                csv_record.latitude, tx
            ),
        ));
    }
    if !csv_record.longitude.is_finite() || !(-180.0..=180.0).contains(&csv_record.longitude) {
        return Err(FraudError::malformed(
            None,
            format!(
                "Longitude {} out of range for transaction '{}'",
                csv_record.longitude, tx
            ),
        ));
    }

    Ok(Transaction {
        transaction_id: tx,
        card_number,
        timestamp,
        amount,
        latitude: csv_record.latitude,
        longitude: csv_record.longitude,
        country,
        device_id,
        failed_auth: csv_record.failed_auth,
    })
}

/// Write the fraud report in CSV format
///
/// Rows are written in the order given, which is input order.
///
/// - `ReportScope::Flagged`: `Transaction_ID,Card_Number,Amount,Timestamp,Fraud_Reason`
///   for flagged rows only
/// - `ReportScope::All`: every input column plus `Fraud_Flag,Fraud_Reason`
///   for every row; the reason is empty when the row is not flagged
pub fn write_report_csv(
    rows: &[AnnotatedTransaction<'_>],
    scope: ReportScope,
    output: &mut dyn Write,
) -> Result<(), FraudError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    let header: &[&str] = match scope {
        ReportScope::Flagged => &[
            "Transaction_ID",
            "Card_Number",
            "Amount",
            "Timestamp",
            "Fraud_Reason",
        ],
        ReportScope::All => &[
            "Transaction_ID",
            "Card_Number",
            "Timestamp",
            "Amount",
            "Latitude",
            "Longitude",
            "Country",
            "Device_ID",
            "Failed_Auth",
            "Fraud_Flag",
            "Fraud_Reason",
        ],
    };
    writer
        .write_record(header)
        .map_err(|e| FraudError::output(format!("Failed to write CSV header: {}", e)))?;

    for row in rows {
        let tx = row.transaction;
        let timestamp = tx.timestamp.format(TIMESTAMP_FORMAT).to_string();
        let reason = row.reason.clone().unwrap_or_default();

        let record = match scope {
            ReportScope::Flagged if !row.flagged => continue,
            ReportScope::Flagged => vec![
                tx.transaction_id.clone(),
                tx.card_number.clone(),
                tx.amount.to_string(),
                timestamp,
                reason,
            ],
            ReportScope::All => vec![
                tx.transaction_id.clone(),
                tx.card_number.clone(),
                timestamp,
                tx.amount.to_string(),
                tx.latitude.to_string(),
                tx.longitude.to_string(),
                tx.country.clone(),
                tx.device_id.clone(),
                tx.failed_auth.to_string(),
                row.flagged.to_string(),
                reason,
            ],
        };

        writer
            .write_record(&record)
            .map_err(|e| FraudError::output(format!("Failed to write report record: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| FraudError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}
