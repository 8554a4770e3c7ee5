//! Verdict projection
//!
//! Applies a merged VerdictMap back onto the transaction set. The projection
//! is total: every input transaction gets a flag and an optional reason, in
//! input order.

use crate::core::grouping::TransactionSet;
use crate::types::{Transaction, VerdictMap};

/// A transaction together with its fraud verdict
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedTransaction<'a> {
    pub transaction: &'a Transaction,

    /// Whether any detector flagged this transaction
    pub flagged: bool,

    /// Human-readable reason, `None` when not flagged
    pub reason: Option<String>,
}

/// Annotate every transaction with its verdict
pub fn project<'a>(
    transactions: &'a TransactionSet,
    verdicts: &VerdictMap,
) -> Vec<AnnotatedTransaction<'a>> {
    transactions
        .iter()
        .map(|transaction| {
            let verdict = verdicts.get(&transaction.transaction_id);
            AnnotatedTransaction {
                transaction,
                flagged: verdict.is_some(),
                reason: verdict.map(|v| v.to_string()),
            }
        })
        .collect()
}
