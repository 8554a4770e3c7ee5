//! High-value transaction detector

use crate::core::grouping::TransactionSet;
use crate::core::traits::Detector;
use crate::types::{Findings, FraudReason};
use rust_decimal::Decimal;

/// Flags amounts strictly greater than the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighValueDetector {
    threshold: Decimal,
}

impl HighValueDetector {
    pub fn new(threshold: Decimal) -> Self {
        Self { threshold }
    }
}

impl Default for HighValueDetector {
    fn default() -> Self {
        Self::new(Decimal::from(10_000))
    }
}

impl Detector for HighValueDetector {
    fn name(&self) -> &'static str {
        "high-value"
    }

    fn reason(&self) -> FraudReason {
        FraudReason::HighValue
    }

    fn detect(&self, transactions: &TransactionSet) -> Findings {
        transactions
            .iter()
            .filter(|tx| tx.amount > self.threshold)
            .map(|tx| (tx.transaction_id.clone(), self.reason()))
            .collect()
    }
}
