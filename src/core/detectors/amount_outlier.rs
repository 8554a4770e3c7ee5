//! Statistical amount outlier detector
//!
//! Builds Tukey fences from the quartiles of every amount in the batch (not
//! per card) and flags amounts strictly outside them. A batch with constant
//! amounts has zero IQR and flags nothing.

use crate::core::grouping::TransactionSet;
use crate::core::stats::IqrBounds;
use crate::core::traits::Detector;
use crate::types::{Findings, FraudReason};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountOutlierDetector {
    multiplier: Decimal,
}

impl AmountOutlierDetector {
    pub fn new(multiplier: Decimal) -> Self {
        Self { multiplier }
    }
}

impl Default for AmountOutlierDetector {
    fn default() -> Self {
        Self::new(Decimal::new(15, 1))
    }
}

impl Detector for AmountOutlierDetector {
    fn name(&self) -> &'static str {
        "iqr-outliers"
    }

    fn reason(&self) -> FraudReason {
        FraudReason::AmountOutlier
    }

    fn detect(&self, transactions: &TransactionSet) -> Findings {
        if transactions.is_empty() {
            return Findings::new();
        }

        let Some(bounds) = IqrBounds::from_values(transactions.amounts(), self.multiplier) else {
            log::warn!(
                "Amount fences overflow the decimal range, skipping outlier check"
            );
            return Findings::new();
        };
        log::debug!(
            "Amount fences: Q1={} Q3={} bounds=[{}, {}]",
            bounds.q1,
            bounds.q3,
            bounds.lower,
            bounds.upper
        );

        transactions
            .iter()
            .filter(|tx| bounds.excludes(tx.amount))
            .map(|tx| (tx.transaction_id.clone(), self.reason()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grouping::test_support::{at, tx};
    use crate::types::Transaction;

    fn with_amounts(amounts: &[i64]) -> TransactionSet {
        let transactions = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| Transaction {
                amount: Decimal::from(amount),
                ..tx(&format!("T{}", i + 1), "C1", at(10, 0, 0))
            })
            .collect();
        TransactionSet::new(transactions).unwrap()
    }

    #[test]
    fn test_flags_only_the_outlier() {
        let set = with_amounts(&[10, 12, 12, 13, 12, 11, 14, 13, 15, 1000]);

        let findings = AmountOutlierDetector::default().detect(&set);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings.get("T10"), Some(&FraudReason::AmountOutlier));
    }

    #[test]
    fn test_flags_low_outliers_too() {
        let set = with_amounts(&[100, 101, 99, 100, 102, 98, 100, 1]);

        let findings = AmountOutlierDetector::default().detect(&set);
        assert_eq!(findings.len(), 1);
        assert!(findings.contains_key("T8"));
    }

    #[test]
    fn test_constant_amounts_flag_nothing() {
        let set = with_amounts(&[50, 50, 50, 50]);
        assert!(AmountOutlierDetector::default().detect(&set).is_empty());
    }

    #[test]
    fn test_empty_set() {
        let set = TransactionSet::new(Vec::new()).unwrap();
        assert!(AmountOutlierDetector::default().detect(&set).is_empty());
    }
}
