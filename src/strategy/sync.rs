//! Synchronous processing strategy
//!
//! Single-threaded pipeline: read the whole batch with `SyncReader`, run the
//! `RuleEngine` detectors one after another, then project and write the
//! report. This is the default strategy.

use crate::core::RuleEngine;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{finish, ProcessingStrategy, ScreeningConfig, ScreeningSummary};
use crate::types::FraudError;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use card_fraud_screener::strategy::{ProcessingStrategy, ScreeningConfig, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(ScreeningConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("transactions.csv"), &mut output)
///     .expect("Screening failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    config: ScreeningConfig,
    engine: RuleEngine,
}

impl SyncProcessingStrategy {
    pub fn new(config: ScreeningConfig) -> Self {
        let engine = config.rule_engine();
        Self { config, engine }
    }
}

impl Default for SyncProcessingStrategy {
    fn default() -> Self {
        Self::new(ScreeningConfig::default())
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ScreeningSummary, FraudError> {
        let transactions = SyncReader::new(input_path)?.read_all()?;
        log::info!(
            "Loaded {} transaction(s) from {}",
            transactions.len(),
            input_path.display()
        );

        let verdicts = self.engine.evaluate(&transactions);

        finish(&transactions, &verdicts, self.config.report_scope, output)
    }
}
