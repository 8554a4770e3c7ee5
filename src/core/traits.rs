//! Core trait for fraud detectors
//!
//! Every rule implements [`Detector`] so the rule engine can run them
//! interchangeably, in order on one thread or fanned out across tasks.

use crate::core::grouping::TransactionSet;
use crate::types::{Findings, FraudReason};

/// A single fraud rule
///
/// Implementations are pure: the same set always yields the same findings,
/// nothing is cached between calls, and no I/O is performed.
pub trait Detector: Send + Sync {
    /// Short stable name used in logs
    fn name(&self) -> &'static str;

    /// The reason this detector attaches to everything it flags
    fn reason(&self) -> FraudReason;

    /// Scan the whole set and return the ids this rule flags
    fn detect(&self, transactions: &TransactionSet) -> Findings;
}
