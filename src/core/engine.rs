//! Rule engine
//!
//! This module provides the RuleEngine that runs every detector over the same
//! immutable transaction set and merges their findings into one VerdictMap.
//!
//! The engine enforces:
//! - A fixed detector evaluation order
//! - A single merge step, applied sequentially in that order
//! - No state between runs: every evaluation is a pure function of its input

use crate::core::config::DetectorConfig;
use crate::core::detectors::{
    AmountOutlierDetector, FailedAuthDetector, HighValueDetector, NewCountryDetector,
    OddHoursDetector, RapidTransactionsDetector, SuspiciousDeviceDetector, TravelSpeedDetector,
};
use crate::core::grouping::TransactionSet;
use crate::core::traits::Detector;
use crate::types::{Findings, VerdictMap};
use clap::ValueEnum;
use std::sync::Arc;

/// How findings from several detectors combine for one transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MergePolicy {
    /// Keep only the reason from the last detector in evaluation order
    #[default]
    LastWriterWins,

    /// Keep every reason, in evaluation order
    AllReasons,
}

/// Fraud rule engine
///
/// Holds the detectors in evaluation order. Detectors are reference counted so
/// the async strategy can hand them to worker tasks without rebuilding them.
#[derive(Clone)]
pub struct RuleEngine {
    detectors: Vec<Arc<dyn Detector>>,
    merge_policy: MergePolicy,
}

impl RuleEngine {
    /// Build the stock rule set from a configuration
    ///
    /// Evaluation order: travel-speed, rapid-transactions, odd-hours,
    /// high-value, iqr-outliers, failed-auth, new-country, suspicious-device.
    /// Under last-writer-wins the later rule's reason survives.
    pub fn new(config: &DetectorConfig, merge_policy: MergePolicy) -> Self {
        let detectors: Vec<Arc<dyn Detector>> = vec![
            Arc::new(TravelSpeedDetector::new(
                config.travel_threshold_km_per_hour,
            )),
            Arc::new(RapidTransactionsDetector::new(config.rapid_window)),
            Arc::new(OddHoursDetector::new(
                config.odd_hours_start,
                config.odd_hours_end,
            )),
            Arc::new(HighValueDetector::new(config.high_value_threshold)),
            Arc::new(AmountOutlierDetector::new(config.iqr_multiplier)),
            Arc::new(FailedAuthDetector::new(config.failed_auth_threshold)),
            Arc::new(NewCountryDetector),
            Arc::new(SuspiciousDeviceDetector::new(
                config.trusted_devices.iter().cloned(),
            )),
        ];

        Self::with_detectors(detectors, merge_policy)
    }

    /// Build an engine over an explicit detector list, evaluated in list order
    pub fn with_detectors(detectors: Vec<Arc<dyn Detector>>, merge_policy: MergePolicy) -> Self {
        RuleEngine {
            detectors,
            merge_policy,
        }
    }

    pub fn detectors(&self) -> &[Arc<dyn Detector>] {
        &self.detectors
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    /// Run every detector in order and merge the findings
    ///
    /// An empty set yields an empty map.
    pub fn evaluate(&self, transactions: &TransactionSet) -> VerdictMap {
        let findings = self.detectors.iter().map(|detector| {
            let found = detector.detect(transactions);
            log::debug!("{} flagged {} transaction(s)", detector.name(), found.len());
            found
        });

        self.merge(findings)
    }

    /// Merge detector findings, which must arrive in evaluation order
    pub fn merge<I>(&self, findings: I) -> VerdictMap
    where
        I: IntoIterator<Item = Findings>,
    {
        let mut verdicts = VerdictMap::new();

        for found in findings {
            for (tx, reason) in found {
                match self.merge_policy {
                    MergePolicy::LastWriterWins => verdicts.overwrite(tx, reason),
                    MergePolicy::AllReasons => verdicts.accumulate(tx, reason),
                }
            }
        }

        verdicts
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(&DetectorConfig::default(), MergePolicy::default())
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.detectors.iter().map(|d| d.name()).collect();
        f.debug_struct("RuleEngine")
            .field("detectors", &names)
            .field("merge_policy", &self.merge_policy)
            .finish()
    }
}
