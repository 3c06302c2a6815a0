//! JSON output adapter.
//!
//! Owns the format decision: line mode serializes each record as it
//! arrives, array mode buffers the batch and emits a single JSON array
//! when flushed.

use anyhow::Result;
use photo_metrics_core::{AnalysisRecord, ResultOutput};
use std::io::{self, Write};
use std::sync::Mutex;

enum Mode {
    /// One record per line, written immediately.
    Lines,
    /// Records held until `flush`, then written as one array.
    Array {
        pretty: bool,
        buffered: Mutex<Vec<AnalysisRecord>>,
    },
}

/// JSON output behind [`ResultOutput`], covering JSONL and array formats.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    mode: Mode,
}

impl JsonOutput {
    /// JSON Lines output to stdout.
    #[must_use]
    pub fn lines_to_stdout() -> Self {
        Self::lines(Box::new(io::stdout()))
    }

    /// Array output to stdout; the array is emitted on flush.
    #[must_use]
    pub fn array_to_stdout(pretty: bool) -> Self {
        Self::array(Box::new(io::stdout()), pretty)
    }

    /// JSON Lines output to the given writer.
    #[must_use]
    pub fn lines(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            mode: Mode::Lines,
        }
    }

    /// Array output to the given writer.
    #[must_use]
    pub fn array(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            mode: Mode::Array {
                pretty,
                buffered: Mutex::new(Vec::new()),
            },
        }
    }

    fn write_line(&self, json: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, record: &AnalysisRecord) -> Result<()> {
        match &self.mode {
            Mode::Lines => self.write_line(&serde_json::to_string(record)?),
            Mode::Array { buffered, .. } => {
                buffered
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                    .push(record.clone());
                Ok(())
            }
        }
    }

    fn flush(&self) -> Result<()> {
        if let Mode::Array { pretty, buffered } = &self.mode {
            let records = std::mem::take(
                &mut *buffered
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
            );
            let json = if *pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            self.write_line(&json)?;
        }
        self.writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
            .flush()?;
        Ok(())
    }
}
