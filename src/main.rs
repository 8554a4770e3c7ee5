//! Card Fraud Screener CLI
//!
//! Command-line interface for screening card transactions from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > fraud_report.csv
//! cargo run -- --strategy async --max-concurrent 8 transactions.csv > fraud_report.csv
//! cargo run -- --merge all-reasons --report all transactions.csv > annotated.csv
//! RUST_LOG=debug cargo run -- --trusted-device "iPhone 13" --trusted-device "Pixel 8" transactions.csv
//! ```
//!
//! The report goes to stdout; logs go to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Detectors run one after another (default)
//! - **async**: Batched async reading, detectors run concurrently
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, malformed record, duplicate transaction ID, etc.)

use card_fraud_screener::cli;
use card_fraud_screener::strategy;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::parse_args();

    let strategy = strategy::create_strategy(
        args.strategy,
        args.to_screening_config(),
        args.to_parallel_config(),
    );

    // Report goes to stdout
    let mut output = std::io::stdout();
    match strategy.process(&args.input_file, &mut output) {
        Ok(summary) => log::debug!("Screening finished: {:?}", summary),
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
