//! Transaction set and per-card grouping
//!
//! This module provides the validated, immutable [`TransactionSet`] that every
//! detector reads, and the derived [`CardGroup`] view used by the sequence
//! detectors.
//!
//! # Grouping
//!
//! Grouping is an explicit two-step pipeline:
//! 1. Stable partition of the set by card number (first-appearance order)
//! 2. Stable sort of each partition by timestamp
//!
//! Groups hold indices into the set, so record data is never copied.
//! Transactions with equal timestamps keep their input order.

use crate::types::{FraudError, Transaction};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Validated batch of transactions in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
}

impl TransactionSet {
    /// Build a transaction set, enforcing transaction ID uniqueness
    ///
    /// # Errors
    ///
    /// Returns `FraudError::DuplicateTransactionId` for the first repeated id.
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, FraudError> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for transaction in &transactions {
            if !seen.insert(transaction.transaction_id.as_str()) {
                return Err(FraudError::duplicate_transaction(
                    &transaction.transaction_id,
                ));
            }
        }

        Ok(Self { transactions })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Column accessor over all amounts, in input order
    pub fn amounts(&self) -> Vec<Decimal> {
        self.transactions.iter().map(|tx| tx.amount).collect()
    }

    /// Group transactions by card, each group sorted chronologically
    pub fn card_groups(&self) -> Vec<CardGroup<'_>> {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut partitions: Vec<Vec<usize>> = Vec::new();

        for (index, transaction) in self.transactions.iter().enumerate() {
            let slot = *slots
                .entry(transaction.card_number.as_str())
                .or_insert_with(|| {
                    partitions.push(Vec::new());
                    partitions.len() - 1
                });
            partitions[slot].push(index);
        }

        partitions
            .into_iter()
            .map(|mut indices| {
                // sort_by_key is stable
                indices.sort_by_key(|&i| self.transactions[i].timestamp);
                CardGroup {
                    transactions: &self.transactions,
                    indices,
                }
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

/// All transactions of one card, ordered by timestamp
#[derive(Debug, Clone)]
pub struct CardGroup<'a> {
    transactions: &'a [Transaction],
    indices: Vec<usize>,
}

impl<'a> CardGroup<'a> {
    pub fn card_number(&self) -> &'a str {
        // Groups are never built empty
        &self.transactions[self.indices[0]].card_number
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        let transactions = self.transactions;
        self.indices.iter().map(move |&i| &transactions[i])
    }

    /// Chronologically ordered transactions, collected for windowed scans
    pub fn ordered(&self) -> Vec<&'a Transaction> {
        self.iter().collect()
    }
}
