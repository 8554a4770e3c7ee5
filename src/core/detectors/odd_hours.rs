//! Odd hours detector
//!
//! Flags every transaction whose hour of day falls inside the configured
//! window, both ends inclusive. Stateless and per transaction.

use crate::core::grouping::TransactionSet;
use crate::core::traits::Detector;
use crate::types::{Findings, FraudReason};
use chrono::Timelike;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OddHoursDetector {
    start_hour: u32,
    end_hour: u32,
}

impl OddHoursDetector {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }
}

impl Default for OddHoursDetector {
    fn default() -> Self {
        Self::new(0, 5)
    }
}

impl Detector for OddHoursDetector {
    fn name(&self) -> &'static str {
        "odd-hours"
    }

    fn reason(&self) -> FraudReason {
        FraudReason::OddHours
    }

    fn detect(&self, transactions: &TransactionSet) -> Findings {
        transactions
            .iter()
            .filter(|tx| (self.start_hour..=self.end_hour).contains(&tx.timestamp.hour()))
            .map(|tx| (tx.transaction_id.clone(), self.reason()))
            .collect()
    }
}
