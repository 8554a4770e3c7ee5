//! Core rule-evaluation module
//!
//! This module contains the fraud screening components:
//! - `grouping` - Validated transaction set and per-card grouping
//! - `traits` - The Detector trait every rule implements
//! - `detectors` - The eight fraud rules
//! - `config` - Detector parameters and their defaults
//! - `engine` - Rule engine: fixed evaluation order and merge policy
//! - `projector` - Applies merged verdicts back onto the transaction set
//! - `geo` - Great-circle distance
//! - `stats` - Decimal percentiles and IQR fences
//! - `async` - Concurrent detector fan-out

pub mod r#async;
pub mod config;
pub mod detectors;
pub mod engine;
pub mod geo;
pub mod grouping;
pub mod projector;
pub mod stats;
pub mod traits;

pub use config::DetectorConfig;
pub use engine::{MergePolicy, RuleEngine};
pub use grouping::{CardGroup, TransactionSet};
pub use projector::{project, AnnotatedTransaction};
pub use r#async::AsyncRuleEngine;
pub use traits::Detector;
