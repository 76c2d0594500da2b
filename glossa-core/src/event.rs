use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Textual timestamp layout carried by delivery events,
/// e.g. `2018-12-26 18:12:19.903159`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Fields a raw record must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "timestamp",
    "translation_id",
    "source_language",
    "target_language",
    "client_name",
    "event_name",
    "nr_words",
    "duration",
];

/// One translation-delivery event, immutable once constructed.
///
/// Events carry no intrinsic ordering; the priority queue in glossa-ops
/// supplies the timestamp comparator.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationEvent {
    pub timestamp: DateTime<Utc>,
    pub translation_id: String,
    pub source_language: String,
    pub target_language: String,
    pub client_name: String,
    pub event_name: String,
    pub nr_words: u64,
    pub duration: u64,
}

impl TranslationEvent {
    /// Builds an event from a raw JSON mapping.
    ///
    /// Every required field must be present before the timestamp is parsed;
    /// the first absent one, in `REQUIRED_FIELDS` order, is reported as
    /// `MissingField`. A present field of the wrong JSON type is an
    /// `InvalidField`, and a timestamp string outside `TIMESTAMP_FORMAT` is
    /// a `MalformedTimestamp`.
    pub fn from_json(raw: &Value) -> Result<Self> {
        let obj = match raw.as_object() {
            Some(obj) => obj,
            None => return Err(Error::MissingField(REQUIRED_FIELDS[0])),
        };
        for name in REQUIRED_FIELDS {
            if !obj.contains_key(name) {
                return Err(Error::MissingField(name));
            }
        }
        Ok(Self {
            timestamp: timestamp_field(obj, "timestamp")?,
            translation_id: string_field(obj, "translation_id")?,
            source_language: string_field(obj, "source_language")?,
            target_language: string_field(obj, "target_language")?,
            client_name: string_field(obj, "client_name")?,
            event_name: string_field(obj, "event_name")?,
            nr_words: integer_field(obj, "nr_words")?,
            duration: integer_field(obj, "duration")?,
        })
    }
}

fn required<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value> {
    obj.get(name).ok_or(Error::MissingField(name))
}

fn timestamp_field(obj: &Map<String, Value>, name: &'static str) -> Result<DateTime<Utc>> {
    let value = required(obj, name)?;
    let text = value
        .as_str()
        .ok_or_else(|| Error::MalformedTimestamp(value.to_string()))?;
    let naive = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|_| Error::MalformedTimestamp(text.to_owned()))?;
    Ok(naive.and_utc())
}

fn string_field(obj: &Map<String, Value>, name: &'static str) -> Result<String> {
    required(obj, name)?
        .as_str()
        .map(str::to_owned)
        .ok_or(Error::InvalidField {
            field: name,
            expected: "a string",
        })
}

fn integer_field(obj: &Map<String, Value>, name: &'static str) -> Result<u64> {
    required(obj, name)?
        .as_u64()
        .ok_or(Error::InvalidField {
            field: name,
            expected: "a non-negative integer",
        })
}
