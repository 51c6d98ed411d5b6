//! Count report - the only thing a run writes to its output

use crate::types::{RunSummary, UrlCount};
use std::io::{self, Write};

/// Writes one line per record as it arrives and the total at the end
pub struct Report<W: Write> {
    out: W,
    summary: RunSummary,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            summary: RunSummary::default(),
        }
    }

    /// Number of records written so far
    pub fn len(&self) -> usize {
        self.summary.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summary.results.is_empty()
    }

    pub fn record(&mut self, record: UrlCount) -> io::Result<()> {
        writeln!(self.out, "Count for {}: {}", record.url, record.count)?;
        self.summary.total += record.count;
        self.summary.results.push(record);
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<RunSummary> {
        writeln!(self.out, "Total: {}", self.summary.total)?;
        self.out.flush()?;
        Ok(self.summary)
    }
}
