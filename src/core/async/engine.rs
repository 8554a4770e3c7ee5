//! Asynchronous rule engine with detector fan-out
//!
//! Runs each detector on a tokio blocking task over a shared, reference
//! counted transaction set, at most `max_concurrent` at a time.
//!
//! # Ordering
//!
//! `buffered` yields results in submission order regardless of which task
//! finishes first, so findings reach the merge step in the same fixed order
//! the synchronous engine uses and the verdicts are identical.

use crate::core::engine::RuleEngine;
use crate::core::grouping::TransactionSet;
use crate::types::{FraudError, VerdictMap};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

/// Rule engine that evaluates detectors concurrently
#[derive(Debug, Clone)]
pub struct AsyncRuleEngine {
    engine: RuleEngine,
    max_concurrent: usize,
}

impl AsyncRuleEngine {
    /// Wrap a rule engine; `max_concurrent` of zero is treated as one
    pub fn new(engine: RuleEngine, max_concurrent: usize) -> Self {
        Self {
            engine,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Run every detector concurrently and merge in evaluation order
    ///
    /// # Errors
    ///
    /// Returns `FraudError::RuntimeError` if a detector task panics or is
    /// cancelled.
    pub async fn evaluate(
        &self,
        transactions: Arc<TransactionSet>,
    ) -> Result<VerdictMap, FraudError> {
        let tasks = self.engine.detectors().iter().cloned().map(|detector| {
            let transactions = Arc::clone(&transactions);
            tokio::task::spawn_blocking(move || {
                let found = detector.detect(&transactions);
                log::debug!("{} flagged {} transaction(s)", detector.name(), found.len());
                found
            })
        });

        let findings: Vec<_> = stream::iter(tasks)
            .buffered(self.max_concurrent)
            .map_err(|e| FraudError::runtime(format!("Detector task failed: {}", e)))
            .try_collect()
            .await?;

        Ok(self.engine.merge(findings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DetectorConfig;
    use crate::core::engine::MergePolicy;
    use crate::core::grouping::test_support::{at, tx};
    use crate::types::Transaction;
    use rust_decimal::Decimal;

    fn sample_set() -> TransactionSet {
        TransactionSet::new(vec![
            Transaction {
                amount: Decimal::from(20_000),
                ..tx("T1", "C1", at(3, 0, 0))
            },
            Transaction {
                country: "FRA".to_string(),
                device_id: "Pixel 8".to_string(),
                ..tx("T2", "C1", at(3, 1, 0))
            },
            Transaction {
                failed_auth: 5,
                ..tx("T3", "C1", at(3, 2, 0))
            },
            tx("T4", "C2", at(12, 0, 0)),
        ])
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_matches_sync_engine() {
        for policy in [MergePolicy::LastWriterWins, MergePolicy::AllReasons] {
            let engine = RuleEngine::new(&DetectorConfig::default(), policy);
            let set = sample_set();

            let expected = engine.evaluate(&set);
            let actual = AsyncRuleEngine::new(engine, 3)
                .evaluate(Arc::new(set))
                .await
                .unwrap();

            assert_eq!(actual, expected);
        }
    }

    #[tokio::test]
    async fn test_empty_set() {
        let engine = AsyncRuleEngine::new(RuleEngine::default(), 4);
        let verdicts = engine
            .evaluate(Arc::new(TransactionSet::default()))
            .await
            .unwrap();
        assert!(verdicts.is_empty());
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        assert_eq!(
            AsyncRuleEngine::new(RuleEngine::default(), 0).max_concurrent(),
            1
        );
    }
}
