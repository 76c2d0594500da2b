//! glossa-io: the I/O collaborators kept out of the core computations.
//!
//! - `FileSource`: reads a JSON array, a single JSON object, or JSON lines
//! - `JsonLineSink`: writes rows as JSON lines to stdout or a file

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use glossa_core::{Error, EventSource, RecordSink, Result};

/// Loads a whole input file and decodes it into raw event mappings.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EventSource for FileSource {
    async fn load(&mut self) -> Result<Vec<Value>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let records = decode_records(&text)?;
        debug!(path = %self.path.display(), records = records.len(), "decoded input file");
        Ok(records)
    }
}

/// Decodes `text` into raw records.
///
/// The full text is tried as one JSON document first: an array is taken
/// as-is, anything else becomes a one-element collection. Text that is not
/// one document is split on newline runs and each non-blank line is decoded
/// on its own; the first undecodable line fails the whole load with
/// `UnparseableSource`. All-or-nothing, no partial results.
pub fn decode_records(text: &str) -> Result<Vec<Value>> {
    if let Ok(document) = serde_json::from_str::<Value>(text) {
        return Ok(match document {
            Value::Array(items) => items,
            other => vec![other],
        });
    }
    let mut records = Vec::new();
    for line in text.split(['\r', '\n']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) => records.push(value),
            Err(err) => {
                return Err(Error::UnparseableSource(format!(
                    "record {}: {err}",
                    records.len() + 1
                )))
            }
        }
    }
    Ok(records)
}

/// Writes each row as a single JSON line, to stdout by default or appended
/// to a file when a path is given.
pub struct JsonLineSink {
    path: Option<PathBuf>,
}

impl JsonLineSink {
    pub fn stdout() -> Self {
        Self { path: None }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

#[async_trait]
impl RecordSink for JsonLineSink {
    async fn emit(&mut self, row: Value) -> Result<()> {
        let line = serde_json::to_string(&row)?;
        if let Some(path) = &self.path {
            use tokio::io::AsyncWriteExt;
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await?;
            file.write_all(line.as_bytes()).await?;
            file.write_all(b"\n").await?;
        } else {
            println!("{}", line);
        }
        Ok(())
    }
}
