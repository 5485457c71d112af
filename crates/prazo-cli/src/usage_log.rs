//! Append-only JSONL usage log.
//!
//! Fire-and-forget: every failure is swallowed. A logging problem must
//! never fail or delay a calculation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use prazo_core::{UsageRecord, UsageSink};

/// Sink appending one JSON line per calculation to the user data dir.
#[derive(Debug, Clone, Default)]
pub struct JsonlSink {
    path: Option<PathBuf>,
}

impl JsonlSink {
    /// Resolve the default log location (`<data-dir>/prazo/usage.jsonl`).
    pub fn new() -> Self {
        let path = dirs::data_dir().map(|dir| dir.join("prazo").join("usage.jsonl"));
        Self { path }
    }

    #[cfg(test)]
    fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn try_record(&self, record: &UsageRecord) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(record).map_err(std::io::Error::other)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")
    }
}

impl UsageSink for JsonlSink {
    fn record(&self, record: &UsageRecord) {
        // Swallowed on purpose.
        let _ = self.try_record(record);
    }
}
