//! Asynchronous fan-out screening strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. The input is read in batches, then every detector
//! runs as its own blocking task over the shared transaction set.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── ParallelConfig (read_batch_size, max_concurrent_detectors)
//!     ├── AsyncReader (batch CSV reading into a TransactionSet)
//!     └── AsyncRuleEngine (one blocking task per detector)
//!         └── RuleEngine::merge (findings merged in detector order)
//! ```
//!
//! Findings are collected in detector order regardless of completion order,
//! so the report is byte-identical to the synchronous strategy's.

use crate::core::AsyncRuleEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::sync_reader::open_error;
use crate::strategy::{finish, ProcessingStrategy, ScreeningConfig, ScreeningSummary};
use crate::types::FraudError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batched reading and detector fan-out
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of records read per batch
    pub read_batch_size: usize,
    /// Maximum number of detectors running concurrently
    pub max_concurrent_detectors: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            read_batch_size: 1000,
            max_concurrent_detectors: num_cpus::get(),
        }
    }
}

impl ParallelConfig {
    /// Create a new ParallelConfig, replacing zero values with defaults
    pub fn new(read_batch_size: usize, max_concurrent_detectors: usize) -> Self {
        let default = Self::default();

        let read_batch_size = if read_batch_size == 0 {
            log::warn!(
                "Invalid read_batch_size ({}), using default ({})",
                read_batch_size,
                default.read_batch_size
            );
            default.read_batch_size
        } else {
            read_batch_size
        };

        let max_concurrent_detectors = if max_concurrent_detectors == 0 {
            log::warn!(
                "Invalid max_concurrent_detectors ({}), using default ({})",
                max_concurrent_detectors,
                default.max_concurrent_detectors
            );
            default.max_concurrent_detectors
        } else {
            max_concurrent_detectors
        };

        Self {
            read_batch_size,
            max_concurrent_detectors,
        }
    }
}

/// Asynchronous fan-out screening strategy
///
/// # Thread Safety
///
/// AsyncProcessingStrategy is Send + Sync; detectors are shared across
/// worker threads behind `Arc`.
///
/// # Configuration
///
/// - `read_batch_size`: Records per read batch (default: 1000)
/// - `max_concurrent_detectors`: Worker threads and detector tasks in flight
///   (default: CPU cores)
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: ScreeningConfig,
    parallel: ParallelConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: ScreeningConfig, parallel: ParallelConfig) -> Self {
        Self { config, parallel }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Screen transactions from the input file and write the report
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads the CSV in batches with AsyncReader; any bad record aborts
    /// 3. Runs each detector on a blocking worker
    /// 4. Merges findings in detector order
    /// 5. Projects and writes the report
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ScreeningSummary, FraudError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.parallel.max_concurrent_detectors)
            .build()
            .map_err(|e| FraudError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        let engine = AsyncRuleEngine::new(
            self.config.rule_engine(),
            self.parallel.max_concurrent_detectors,
        );

        let (transactions, verdicts) = runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| open_error(input_path, e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

            let transactions = AsyncReader::new(compat_file)
                .read_all(self.parallel.read_batch_size)
                .await?;
            log::info!(
                "Loaded {} transaction(s) from {}",
                transactions.len(),
                input_path.display()
            );

            let transactions = Arc::new(transactions);
            let verdicts = engine.evaluate(Arc::clone(&transactions)).await?;

            Ok::<_, FraudError>((transactions, verdicts))
        })?;

        finish(&transactions, &verdicts, self.config.report_scope, output)
    }
}
