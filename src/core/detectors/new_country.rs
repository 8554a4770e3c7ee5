//! New or unusual country detector
//!
//! Walks each card's history in time order. The first country a card is used
//! in becomes its baseline and is never flagged. The first transaction in
//! every further country is flagged; revisits to any seen country are not.

use crate::core::grouping::TransactionSet;
use crate::core::traits::Detector;
use crate::types::{Findings, FraudReason};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewCountryDetector;

impl Detector for NewCountryDetector {
    fn name(&self) -> &'static str {
        "new-country"
    }

    fn reason(&self) -> FraudReason {
        FraudReason::NewCountry
    }

    fn detect(&self, transactions: &TransactionSet) -> Findings {
        let mut findings = Findings::new();

        for group in transactions.card_groups() {
            let mut seen: HashSet<&str> = HashSet::new();
            for transaction in group.iter() {
                if !seen.insert(transaction.country.as_str()) {
                    continue;
                }
                if seen.len() > 1 {
                    findings.insert(transaction.transaction_id.clone(), self.reason());
                }
            }
        }

        findings
    }
}
