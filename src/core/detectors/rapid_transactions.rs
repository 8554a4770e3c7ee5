//! Rapid consecutive transactions detector
//!
//! Slides a three-transaction window over each card's history and flags the
//! third transaction whenever the window spans less than the rapid window.
//! A long burst therefore flags every transaction from the third onwards,
//! one per window, never the first two.

use crate::core::grouping::TransactionSet;
use crate::core::traits::Detector;
use crate::types::{Findings, FraudReason};
use chrono::TimeDelta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RapidTransactionsDetector {
    window: TimeDelta,
}

impl RapidTransactionsDetector {
    pub fn new(window: TimeDelta) -> Self {
        Self { window }
    }
}

impl Default for RapidTransactionsDetector {
    fn default() -> Self {
        Self::new(TimeDelta::seconds(300))
    }
}

impl Detector for RapidTransactionsDetector {
    fn name(&self) -> &'static str {
        "rapid-transactions"
    }

    fn reason(&self) -> FraudReason {
        FraudReason::RapidTransactions
    }

    fn detect(&self, transactions: &TransactionSet) -> Findings {
        let mut findings = Findings::new();

        for group in transactions.card_groups() {
            let ordered = group.ordered();
            for triple in ordered.windows(3) {
                if triple[2].timestamp - triple[0].timestamp < self.window {
                    findings.insert(triple[2].transaction_id.clone(), self.reason());
                }
            }
        }

        findings
    }
}
