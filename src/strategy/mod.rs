//! Processing strategy module for fraud screening
//!
//! This module defines the Strategy pattern for complete screening pipelines,
//! encompassing CSV loading, rule evaluation and report output. Different
//! implementations (synchronous, asynchronous fan-out) can be selected at
//! runtime and produce identical reports.

use crate::cli::StrategyType;
use crate::core::{project, DetectorConfig, MergePolicy, RuleEngine, TransactionSet};
use crate::io::csv_format::{write_report_csv, ReportScope};
use crate::types::{FraudError, VerdictMap};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, ParallelConfig};
pub use sync::SyncProcessingStrategy;

/// Everything that shapes a screening run, independent of strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreeningConfig {
    pub detectors: DetectorConfig,
    pub merge_policy: MergePolicy,
    pub report_scope: ReportScope,
}

impl ScreeningConfig {
    pub fn rule_engine(&self) -> RuleEngine {
        RuleEngine::new(&self.detectors, self.merge_policy)
    }
}

/// Outcome counts of a screening run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreeningSummary {
    /// Transactions screened
    pub total: usize,

    /// Transactions flagged by at least one detector
    pub flagged: usize,
}

/// Processing strategy trait for complete screening pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Screen the transactions in `input_path` and write the report to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - Any record is malformed or a transaction ID repeats; nothing is
    ///   screened in that case
    /// - The report cannot be written
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ScreeningSummary, FraudError>;
}

/// Project verdicts, write the report and summarize; shared by all strategies
pub(crate) fn finish(
    transactions: &TransactionSet,
    verdicts: &VerdictMap,
    scope: ReportScope,
    output: &mut dyn Write,
) -> Result<ScreeningSummary, FraudError> {
    let rows = project(transactions, verdicts);
    write_report_csv(&rows, scope, output)?;

    let summary = ScreeningSummary {
        total: transactions.len(),
        flagged: verdicts.len(),
    };
    log::info!(
        "Total Fraudulent Transactions Detected: {} of {}",
        summary.flagged,
        summary.total
    );

    Ok(summary)
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Detector, merge and report settings
/// * `parallel` - Optional fan-out configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: ScreeningConfig,
    parallel: Option<ParallelConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(config)),
        StrategyType::Async => {
            let parallel = parallel.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, parallel))
        }
    }
}
