//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transaction record and identifiers
//! - `verdict`: Fraud reasons, detector findings and the merged verdict map
//! - `error`: Error types for the fraud screener

pub mod error;
pub mod transaction;
pub mod verdict;

pub use error::FraudError;
pub use transaction::{CardNumber, Transaction, TransactionId};
pub use verdict::{Findings, FraudReason, Verdict, VerdictMap};
