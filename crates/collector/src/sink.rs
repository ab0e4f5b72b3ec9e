//! Append-only CSV sink for observations.

use std::fs::OpenOptions;
use std::path::PathBuf;

use p2p_core::{Error, Observation, Result};

/// Append-only CSV writer for the observation log.
///
/// The header row is written exactly once, only when the destination is
/// newly created; later appends add data rows only. Sink failure is the
/// one fatal condition in the system: a row that cannot be appended is
/// an observation lost.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one observation, creating the file and header on first use.
    pub fn append(&self, observation: &Observation) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let fresh = file.metadata()?.len() == 0;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if fresh {
            writer
                .write_record(Observation::HEADER)
                .map_err(|e| Error::sink(e.to_string()))?;
        }
        writer
            .write_record(observation.to_record())
            .map_err(|e| Error::sink(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }
}
