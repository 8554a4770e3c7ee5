//! Transaction-related types for the card fraud screener
//!
//! This module defines the validated transaction record that every detector
//! reads. Records are produced by the I/O layer and never mutated afterwards.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Transaction identifier
///
/// Primary key of the verdict map. Kept as a string so both numeric and
/// prefixed identifiers (e.g. `T1001`) round-trip unchanged.
pub type TransactionId = String;

/// Card identifier
///
/// Groups the transactions that belong to one account.
pub type CardNumber = String;

/// A single card transaction
///
/// Represents one fully validated row of the input dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Unique transaction identifier
    pub transaction_id: TransactionId,

    /// Card the transaction was made with
    pub card_number: CardNumber,

    /// Wall-clock time of the transaction
    ///
    /// Totally ordered; subtraction yields a `chrono::TimeDelta`.
    pub timestamp: NaiveDateTime,

    /// Non-negative amount, currency-agnostic
    pub amount: Decimal,

    /// Latitude of the transaction origin in degrees (-90..=90)
    pub latitude: f64,

    /// Longitude of the transaction origin in degrees (-180..=180)
    pub longitude: f64,

    /// Country label of the transaction origin
    pub country: String,

    /// Identifier of the originating device
    pub device_id: String,

    /// Number of failed authentication attempts for this transaction
    pub failed_auth: u32,
}
