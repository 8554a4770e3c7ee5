//! Repeated authentication failure detector

use crate::core::grouping::TransactionSet;
use crate::core::traits::Detector;
use crate::types::{Findings, FraudReason};

/// Flags transactions with more failed authentications than the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedAuthDetector {
    threshold: u32,
}

impl FailedAuthDetector {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }
}

impl Default for FailedAuthDetector {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Detector for FailedAuthDetector {
    fn name(&self) -> &'static str {
        "failed-auth"
    }

    fn reason(&self) -> FraudReason {
        FraudReason::FailedAuthentication
    }

    fn detect(&self, transactions: &TransactionSet) -> Findings {
        transactions
            .iter()
            .filter(|tx| tx.failed_auth > self.threshold)
            .map(|tx| (tx.transaction_id.clone(), self.reason()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grouping::test_support::{at, tx};
    use crate::types::Transaction;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(2, false)]
    #[case(3, true)]
    #[case(10, true)]
    fn test_default_threshold(#[case] failed_auth: u32, #[case] flagged: bool) {
        let set = TransactionSet::new(vec![Transaction {
            failed_auth,
            ..tx("T1", "C1", at(10, 0, 0))
        }])
        .unwrap();

        let findings = FailedAuthDetector::default().detect(&set);
        assert_eq!(findings.contains_key("T1"), flagged);
    }

    #[test]
    fn test_zero_threshold_flags_any_failure() {
        let set = TransactionSet::new(vec![Transaction {
            failed_auth: 1,
            ..tx("T1", "C1", at(10, 0, 0))
        }])
        .unwrap();

        let findings = FailedAuthDetector::new(0).detect(&set);
        assert_eq!(findings.get("T1"), Some(&FraudReason::FailedAuthentication));
    }
}
