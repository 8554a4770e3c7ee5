//! Asynchronous CSV reader with batch interface
//!
//! Reads transaction records from any `futures::io::AsyncRead` in batches.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Transactions → TransactionSet
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```
//!
//! Unlike a skip-and-continue reader, the first bad record ends the read with
//! an error, so a batch is never screened with rows missing.

use crate::core::TransactionSet;
use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{FraudError, Transaction};
use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures::io::AsyncRead;

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncReader<R>,
    headers: Option<StringRecord>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .trim(Trim::All)
            .create_reader(reader);

        Self {
            csv_reader,
            headers: None,
        }
    }

    /// Read up to `batch_size` transactions
    ///
    /// Returns an empty vector at end of input.
    ///
    /// # Errors
    ///
    /// The first malformed record, with the physical line it starts on.
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<Transaction>, FraudError> {
        let headers = match &self.headers {
            Some(headers) => headers.clone(),
            None => {
                let headers = self.csv_reader.headers().await?.clone();
                self.headers = Some(headers.clone());
                headers
            }
        };

        let mut batch = Vec::with_capacity(batch_size);
        let mut record = StringRecord::new();

        while batch.len() < batch_size && self.csv_reader.read_record(&mut record).await? {
            let line = record.position().map(|pos| pos.line());
            let transaction = record
                .deserialize::<CsvRecord>(Some(&headers))
                .map_err(FraudError::from)
                .and_then(convert_csv_record)
                .map_err(|e| match line {
                    Some(line) => e.at_line(line),
                    None => e,
                })?;
            batch.push(transaction);
        }

        Ok(batch)
    }

    /// Read the whole input into a validated transaction set
    pub async fn read_all(mut self, batch_size: usize) -> Result<TransactionSet, FraudError> {
        let batch_size = batch_size.max(1);
        let mut transactions = Vec::new();

        loop {
            let batch = self.read_batch(batch_size).await?;
            if batch.is_empty() {
                break;
            }
            log::debug!("Read batch of {} transaction(s)", batch.len());
            transactions.extend(batch);
        }

        TransactionSet::new(transactions)
    }
}
