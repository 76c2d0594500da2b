//! glossa-core: fundamental types shared by every glossa crate.
//!
//! - `TranslationEvent`: one validated delivery event
//! - `Error` / `Result`: classified failures, fatal at the point of detection
//! - `AnalysisConfig`, `AnalysisMode`, `TargetField`: the configuration surface
//! - Traits: `EventSource`, `RecordSink`: the seams behind which file
//!   reading and result rendering live

pub mod config;
pub mod event;

pub use config::{AnalysisConfig, AnalysisMode, TargetField, DEFAULT_WINDOW_SIZE_MINUTES};
pub use event::{TranslationEvent, REQUIRED_FIELDS, TIMESTAMP_FORMAT};

/// Failures are unrecoverable where detected and propagate to the caller;
/// there is no retry or partial-result policy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("malformed timestamp `{0}`, expected `YYYY-MM-DD HH:MM:SS.ffffff`")]
    MalformedTimestamp(String),
    #[error("no events to aggregate")]
    EmptyInput,
    #[error("extract_min on an empty queue")]
    EmptyCollection,
    #[error("input is neither a JSON array nor JSON lines: {0}")]
    UnparseableSource(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Supplies the computations with raw, still-untyped event mappings.
/// Decoding the container format is the source's concern, not the core's.
#[async_trait::async_trait]
pub trait EventSource: Send {
    async fn load(&mut self) -> Result<Vec<serde_json::Value>>;
}

/// Consumes rendered result rows, one flat mapping at a time.
#[async_trait::async_trait]
pub trait RecordSink: Send {
    async fn emit(&mut self, row: serde_json::Value) -> Result<()>;
}

pub mod prelude {
    pub use super::{
        AnalysisConfig, AnalysisMode, Error, EventSource, RecordSink, Result, TargetField,
        TranslationEvent,
    };
}
