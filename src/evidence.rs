//! Destinations for the reason a variant passed a model.
//!
//! The checkers never open files themselves. Callers pick a sink for the
//! run and share it between workers; every sink here takes a lock per
//! record so concurrent writers never interleave.

use crate::error::EvidenceSinkError;
use crate::rules::ReasonCode;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub trait EvidenceSink: Send + Sync {
    fn record(&self, variant_id: &str, reason: ReasonCode) -> Result<(), EvidenceSinkError>;
}

impl<S: EvidenceSink + ?Sized> EvidenceSink for Arc<S> {
    fn record(&self, variant_id: &str, reason: ReasonCode) -> Result<(), EvidenceSinkError> {
        (**self).record(variant_id, reason)
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EvidenceSink for NoopSink {
    fn record(&self, _variant_id: &str, _reason: ReasonCode) -> Result<(), EvidenceSinkError> {
        Ok(())
    }
}

/// Keeps records in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(String, ReasonCode)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<(String, ReasonCode)> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EvidenceSink for MemorySink {
    fn record(&self, variant_id: &str, reason: ReasonCode) -> Result<(), EvidenceSinkError> {
        self.records
            .lock()
            .map_err(|_| EvidenceSinkError::Poisoned)?
            .push((variant_id.to_owned(), reason));
        Ok(())
    }
}

/// Sends every record to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    level: log::Level,
}

impl LogSink {
    pub fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(log::Level::Info)
    }
}

impl EvidenceSink for LogSink {
    fn record(&self, variant_id: &str, reason: ReasonCode) -> Result<(), EvidenceSinkError> {
        log::log!(self.level, "{},{}", variant_id, reason);
        Ok(())
    }
}

/// Writes one delimited row per record.
///
/// Rows are `variant_id,reason` with an optional third `description` column.
/// Each row is flushed before the lock is released.
pub struct CsvSink<W: Write> {
    writer: Mutex<csv::Writer<W>>,
    describe: bool,
}

impl<W: Write> CsvSink<W> {
    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, EvidenceSinkError> {
        let writer = self
            .writer
            .into_inner()
            .map_err(|_| EvidenceSinkError::Poisoned)?;
        writer
            .into_inner()
            .map_err(|e| {
                EvidenceSinkError::Io(io::Error::new(e.error().kind(), e.error().to_string()))
            })
    }
}

impl<W: Write + Send> EvidenceSink for CsvSink<W> {
    fn record(&self, variant_id: &str, reason: ReasonCode) -> Result<(), EvidenceSinkError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| EvidenceSinkError::Poisoned)?;
        if self.describe {
            writer.write_record(&[variant_id, reason.as_str(), reason.description()])?;
        } else {
            writer.write_record(&[variant_id, reason.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

pub struct CsvSinkBuilder {
    headers: bool,
    delimiter: u8,
    describe: bool,
}

impl CsvSinkBuilder {
    /// Construct a new CsvSink builder
    pub fn new() -> Self {
        Self {
            headers: true,
            delimiter: b',',
            describe: false,
        }
    }

    pub fn headers(&mut self, headers: bool) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Adds a column with the human readable description of each reason.
    pub fn describe(&mut self, describe: bool) -> &mut Self {
        self.describe = describe;
        self
    }

    pub fn from_writer<W: Write>(&self, writer: W) -> Result<CsvSink<W>, EvidenceSinkError> {
        self.build(writer, self.headers)
    }

    /// Appends to the file at `path`, creating it if needed.
    ///
    /// The header row is only written when the file is empty.
    pub fn append_path<P: AsRef<Path>>(&self, path: P) -> Result<CsvSink<File>, EvidenceSinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let empty = file.metadata()?.len() == 0;
        self.build(file, self.headers && empty)
    }

    fn build<W: Write>(&self, writer: W, write_header: bool) -> Result<CsvSink<W>, EvidenceSinkError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .from_writer(writer);

        if write_header {
            if self.describe {
                writer.write_record(&["variant_id", "reason", "description"])?;
            } else {
                writer.write_record(&["variant_id", "reason"])?;
            }
            writer.flush()?;
        }

        Ok(CsvSink {
            writer: Mutex::new(writer),
            describe: self.describe,
        })
    }
}

impl Default for CsvSinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
