use crate::core::{DetectorConfig, MergePolicy};
use crate::io::ReportScope;
use crate::strategy::{ParallelConfig, ScreeningConfig};
use chrono::TimeDelta;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Screen card transactions for fraud with rule-based detectors
#[derive(Parser, Debug)]
#[command(name = "fraud-screener")]
#[command(about = "Screen card transactions for fraud with rule-based detectors", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing transaction records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for screening
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent detectors"
    )]
    pub strategy: StrategyType,

    /// Number of records read per batch (async mode only)
    #[arg(
        long = "read-batch-size",
        value_name = "SIZE",
        help = "Number of records read per batch (default: 1000)"
    )]
    pub read_batch_size: Option<usize>,

    /// Maximum number of detectors running concurrently (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of detectors running concurrently (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,

    #[arg(
        long = "travel-threshold",
        allow_negative_numbers = true,
        value_name = "KM_PER_HOUR",
        help = "Travel speed above which consecutive card uses are flagged (default: 500)"
    )]
    pub travel_threshold: Option<f64>,

    #[arg(
        long = "high-value-threshold",
        allow_negative_numbers = true,
        value_name = "AMOUNT",
        help = "Amounts strictly above this are flagged (default: 10000)"
    )]
    pub high_value_threshold: Option<Decimal>,

    #[arg(
        long = "failed-auth-threshold",
        value_name = "COUNT",
        help = "Failed authentication counts strictly above this are flagged (default: 2)"
    )]
    pub failed_auth_threshold: Option<u32>,

    /// Trusted device IDs; repeat the flag for several devices
    #[arg(
        long = "trusted-device",
        value_name = "DEVICE",
        help = "Device ID that is never flagged, repeatable (default: 'iPhone 13')"
    )]
    pub trusted_devices: Vec<String>,

    #[arg(
        long = "rapid-window-secs",
        value_name = "SECONDS",
        allow_negative_numbers = true,
        help = "Window in which three card uses count as rapid (default: 300)"
    )]
    pub rapid_window_secs: Option<i64>,

    #[arg(
        long = "odd-hours-start",
        value_name = "HOUR",
        help = "First unusual hour of day, inclusive (default: 0)"
    )]
    pub odd_hours_start: Option<u32>,

    #[arg(
        long = "odd-hours-end",
        value_name = "HOUR",
        help = "Last unusual hour of day, inclusive (default: 5)"
    )]
    pub odd_hours_end: Option<u32>,

    #[arg(
        long = "iqr-multiplier",
        allow_negative_numbers = true,
        value_name = "FACTOR",
        help = "IQR multiplier for amount outlier fences (default: 1.5)"
    )]
    pub iqr_multiplier: Option<Decimal>,

    /// How findings from several detectors combine per transaction
    #[arg(
        long = "merge",
        value_name = "POLICY",
        default_value = "last-writer-wins",
        help = "Merge policy: keep the last detector's reason or all reasons"
    )]
    pub merge: MergePolicy,

    #[arg(
        long = "report",
        value_name = "SCOPE",
        default_value = "flagged",
        help = "Report scope: flagged rows only, or every row annotated"
    )]
    pub report: ReportScope,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Build detector parameters from CLI arguments
    ///
    /// Unset flags keep their defaults; unusable values fall back to
    /// defaults with a warning.
    pub fn to_detector_config(&self) -> DetectorConfig {
        let default = DetectorConfig::default();

        let trusted_devices = if self.trusted_devices.is_empty() {
            default.trusted_devices.clone()
        } else {
            self.trusted_devices.clone()
        };

        DetectorConfig {
            travel_threshold_km_per_hour: self
                .travel_threshold
                .unwrap_or(default.travel_threshold_km_per_hour),
            rapid_window: self.rapid_window(default.rapid_window),
            odd_hours_start: self.odd_hours_start.unwrap_or(default.odd_hours_start),
            odd_hours_end: self.odd_hours_end.unwrap_or(default.odd_hours_end),
            high_value_threshold: self
                .high_value_threshold
                .unwrap_or(default.high_value_threshold),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(default.iqr_multiplier),
            failed_auth_threshold: self
                .failed_auth_threshold
                .unwrap_or(default.failed_auth_threshold),
            trusted_devices,
        }
        .validated()
    }

    /// Rapid window from `--rapid-window-secs`; values beyond the
    /// representable duration range fall back to `default`
    fn rapid_window(&self, default: TimeDelta) -> TimeDelta {
        let Some(secs) = self.rapid_window_secs else {
            return default;
        };

        TimeDelta::try_seconds(secs).unwrap_or_else(|| {
            log::warn!(
                "Invalid rapid window ({}s), using default ({}s)",
                secs,
                default.num_seconds()
            );
            default
        })
    }

    pub fn to_screening_config(&self) -> ScreeningConfig {
        ScreeningConfig {
            detectors: self.to_detector_config(),
            merge_policy: self.merge,
            report_scope: self.report,
        }
    }

    /// Create a ParallelConfig from CLI arguments
    ///
    /// Returns `None` for the sync strategy, which has no use for one.
    pub fn to_parallel_config(&self) -> Option<ParallelConfig> {
        if self.strategy == StrategyType::Sync {
            return None;
        }

        if self.read_batch_size.is_some() || self.max_concurrent.is_some() {
            let default = ParallelConfig::default();
            Some(ParallelConfig::new(
                self.read_batch_size.unwrap_or(default.read_batch_size),
                self.max_concurrent
                    .unwrap_or(default.max_concurrent_detectors),
            ))
        } else {
            Some(ParallelConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "input.csv"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "input.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "input.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::defaults(&["program", "input.csv"], MergePolicy::LastWriterWins, ReportScope::Flagged)]
    #[case::all_reasons(
        &["program", "--merge", "all-reasons", "input.csv"],
        MergePolicy::AllReasons,
        ReportScope::Flagged
    )]
    #[case::full_report(
        &["program", "--report", "all", "input.csv"],
        MergePolicy::LastWriterWins,
        ReportScope::All
    )]
    fn test_merge_and_report_parsing(
        #[case] args: &[&str],
        #[case] merge: MergePolicy,
        #[case] report: ReportScope,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_screening_config();
        assert_eq!(config.merge_policy, merge);
        assert_eq!(config.report_scope, report);
    }

    #[test]
    fn test_detector_defaults_when_no_flags() {
        let parsed = CliArgs::try_parse_from(["program", "input.csv"]).unwrap();
        assert_eq!(parsed.to_detector_config(), DetectorConfig::default());
    }

    #[test]
    fn test_detector_flags() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--travel-threshold",
            "800",
            "--high-value-threshold",
            "5000.50",
            "--failed-auth-threshold",
            "0",
            "--trusted-device",
            "Pixel 8",
            "--trusted-device",
            "iPhone 13",
            "--rapid-window-secs",
            "60",
            "--odd-hours-start",
            "1",
            "--odd-hours-end",
            "4",
            "--iqr-multiplier",
            "3",
            "input.csv",
        ])
        .unwrap();

        let config = parsed.to_detector_config();
        assert_eq!(config.travel_threshold_km_per_hour, 800.0);
        assert_eq!(config.high_value_threshold, Decimal::new(500050, 2));
        assert_eq!(config.failed_auth_threshold, 0);
        assert_eq!(config.trusted_devices, vec!["Pixel 8", "iPhone 13"]);
        assert_eq!(config.rapid_window, TimeDelta::seconds(60));
        assert_eq!((config.odd_hours_start, config.odd_hours_end), (1, 4));
        assert_eq!(config.iqr_multiplier, Decimal::from(3));
    }

    // Unusable values fall back to defaults
    #[rstest]
    #[case::zero_travel(&["program", "--travel-threshold", "0", "input.csv"])]
    #[case::negative_window(&["program", "--rapid-window-secs", "-5", "input.csv"])]
    #[case::hour_out_of_range(&["program", "--odd-hours-end", "24", "input.csv"])]
    #[case::start_after_end(&["program", "--odd-hours-start", "6", "--odd-hours-end", "2", "input.csv"])]
    #[case::negative_multiplier(&["program", "--iqr-multiplier", "-1", "input.csv"])]
    #[case::window_beyond_duration_range(&["program", "--rapid-window-secs", "9223372036854775807", "input.csv"])]
    #[case::window_below_duration_range(&["program", "--rapid-window-secs", "-9223372036854775808", "input.csv"])]
    fn test_invalid_detector_values_fall_back(#[case] args: &[&str]) {
        let config = CliArgs::try_parse_from(args).unwrap().to_detector_config();
        assert_eq!(config, DetectorConfig::default());
    }

    #[rstest]
    #[case::sync_has_none(&["program", "input.csv"], None)]
    #[case::async_defaults(
        &["program", "--strategy", "async", "input.csv"],
        Some(ParallelConfig::default())
    )]
    #[case::custom_batch_size(
        &["program", "--strategy", "async", "--read-batch-size", "2000", "input.csv"],
        Some(ParallelConfig::new(2000, num_cpus::get()))
    )]
    #[case::custom_max_concurrent(
        &["program", "--strategy", "async", "--max-concurrent", "8", "input.csv"],
        Some(ParallelConfig::new(1000, 8))
    )]
    #[case::zero_batch_size(
        &["program", "--strategy", "async", "--read-batch-size", "0", "input.csv"],
        Some(ParallelConfig::default())
    )]
    fn test_parallel_config_conversion(
        #[case] args: &[&str],
        #[case] expected: Option<ParallelConfig>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_parallel_config(), expected);
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "input.csv"])]
    #[case::invalid_merge(&["program", "--merge", "first", "input.csv"])]
    #[case::invalid_amount(&["program", "--high-value-threshold", "lots", "input.csv"])]
    #[case::negative_failed_auth(&["program", "--failed-auth-threshold", "-1", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
