//! Verdict types produced by the rule engine
//!
//! A detector returns [`Findings`]: a partial map from transaction id to the
//! single reason that detector knows about. The engine merges all findings
//! into a [`VerdictMap`].

use super::transaction::TransactionId;
use std::collections::HashMap;
use std::fmt;

/// Reasons a transaction can be flagged for
///
/// The display strings are the human-readable reasons written to reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FraudReason {
    /// Consecutive transactions too far apart for the elapsed time
    UnrealisticTravel,

    /// Three transactions on one card inside the rapid window
    RapidTransactions,

    /// First use of the card in a country other than its first one
    NewCountry,

    /// Transaction made during the odd-hours window
    OddHours,

    /// Amount above the high-value threshold
    HighValue,

    /// Device not in the trusted allowlist
    SuspiciousDevice,

    /// Amount outside the interquartile bounds of the dataset
    AmountOutlier,

    /// Too many failed authentication attempts
    FailedAuthentication,
}

impl FraudReason {
    /// Human-readable description used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudReason::UnrealisticTravel => "Unrealistic travel distance",
            FraudReason::RapidTransactions => "Rapid consecutive transactions",
            FraudReason::NewCountry => "Transaction in new/unusual country",
            FraudReason::OddHours => "Unusual transaction time",
            FraudReason::HighValue => "High-value transaction",
            FraudReason::SuspiciousDevice => "Used suspicious device ID",
            FraudReason::AmountOutlier => "Not in IQR's range",
            FraudReason::FailedAuthentication => "Multiple failed authentications",
        }
    }
}

impl fmt::Display for FraudReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a single detector
///
/// Absence of an id means "not flagged by this detector", not "legitimate".
pub type Findings = HashMap<TransactionId, FraudReason>;

/// Final verdict for one flagged transaction
///
/// Reasons are kept in detector evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    reasons: Vec<FraudReason>,
}

impl Verdict {
    pub fn new(reason: FraudReason) -> Self {
        Verdict {
            reasons: vec![reason],
        }
    }

    /// Replace every recorded reason with `reason`
    pub fn replace(&mut self, reason: FraudReason) {
        self.reasons.clear();
        self.reasons.push(reason);
    }

    /// Append `reason` unless it is already recorded
    pub fn push(&mut self, reason: FraudReason) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }

    pub fn reasons(&self) -> &[FraudReason] {
        &self.reasons
    }

    /// The reason recorded last, which is the surviving reason under
    /// last-writer-wins merging
    pub fn primary(&self) -> Option<FraudReason> {
        self.reasons.last().copied()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, reason) in self.reasons.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(reason.as_str())?;
        }
        Ok(())
    }
}

/// Merged transaction-id to verdict map
///
/// Built fresh for every run. A transaction is flagged iff its id is a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerdictMap {
    verdicts: HashMap<TransactionId, Verdict>,
}

impl VerdictMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tx: &str) -> Option<&Verdict> {
        self.verdicts.get(tx)
    }

    pub fn contains(&self, tx: &str) -> bool {
        self.verdicts.contains_key(tx)
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TransactionId> {
        self.verdicts.keys()
    }

    /// Record `reason`, discarding whatever the transaction had before
    pub fn overwrite(&mut self, tx: TransactionId, reason: FraudReason) {
        self.verdicts
            .entry(tx)
            .and_modify(|verdict| verdict.replace(reason))
            .or_insert_with(|| Verdict::new(reason));
    }

    /// Record `reason` alongside any reasons the transaction already has
    pub fn accumulate(&mut self, tx: TransactionId, reason: FraudReason) {
        self.verdicts
            .entry(tx)
            .and_modify(|verdict| verdict.push(reason))
            .or_insert_with(|| Verdict::new(reason));
    }
}
