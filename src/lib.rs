//! Card Fraud Screener Library
//! # Overview
//!
//! Screens a batch of card transactions loaded from CSV with eight
//! independent rule-based detectors and reports which transactions look
//! fraudulent, with a reason for each. Both a sync and an async strategy are
//! provided; they produce identical reports.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Transaction, FraudReason, Verdict, FraudError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Screening logic:
//!   - [`core::grouping`] - Validated transaction set and per-card grouping
//!   - [`core::detectors`] - The eight fraud rules
//!   - [`core::engine`] - Fixed evaluation order and merge policy
//!   - [`core::projector`] - Verdicts applied back onto transactions
//! - [`io`] - CSV loading and report output
//! - [`strategy`] - Complete pipelines (sync, async fan-out)
//!
//! # Detectors
//!
//! Evaluated in this order; with the default merge policy the last detector
//! to flag a transaction supplies its reason:
//!
//! 1. **Travel speed**: implied speed between consecutive card uses above 500 km/h
//! 2. **Rapid transactions**: third of three card uses within 5 minutes
//! 3. **Odd hours**: local hour between 00 and 05 inclusive
//! 4. **High value**: amount above 10000
//! 5. **IQR outliers**: amount outside the Tukey fences of the whole batch
//! 6. **Failed auth**: more than 2 failed authentications
//! 7. **New country**: card seen in a second (or further) distinct country
//! 8. **Suspicious device**: device outside the trusted list

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    AsyncRuleEngine, Detector, DetectorConfig, MergePolicy, RuleEngine, TransactionSet,
};
pub use io::write_report_csv;
pub use strategy::{create_strategy, ProcessingStrategy, ScreeningConfig, ScreeningSummary};
pub use types::{
    CardNumber, Findings, FraudError, FraudReason, Transaction, TransactionId, Verdict, VerdictMap,
};
