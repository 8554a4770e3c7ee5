//! Suspicious device detector
//!
//! Any device outside the trusted allowlist is suspicious. The allowlist is
//! global to the batch, not per card.

use crate::core::config::DEFAULT_TRUSTED_DEVICE;
use crate::core::grouping::TransactionSet;
use crate::core::traits::Detector;
use crate::types::{Findings, FraudReason};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspiciousDeviceDetector {
    trusted: HashSet<String>,
}

impl SuspiciousDeviceDetector {
    pub fn new<I, S>(trusted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trusted: trusted.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for SuspiciousDeviceDetector {
    fn default() -> Self {
        Self::new([DEFAULT_TRUSTED_DEVICE])
    }
}

impl Detector for SuspiciousDeviceDetector {
    fn name(&self) -> &'static str {
        "suspicious-device"
    }

    fn reason(&self) -> FraudReason {
        FraudReason::SuspiciousDevice
    }

    fn detect(&self, transactions: &TransactionSet) -> Findings {
        transactions
            .iter()
            .filter(|tx| !self.trusted.contains(&tx.device_id))
            .map(|tx| (tx.transaction_id.clone(), self.reason()))
            .collect()
    }
}
