use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use tracing::warn;
use crate::core::utils::{coerce_int, lenient_int, lenient_text};

/// Position of a record inside the index, assigned at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u32);

impl DocId {
    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn as_index(&self) -> usize {
        self.0 as usize
    }
}

/// A paper as supplied by the caller. Decoding is lenient: a bad field falls back
/// to its default instead of rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, rename = "abstract", deserialize_with = "lenient_text")]
    pub abstract_text: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub conference: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub year: Value,
    #[serde(default, deserialize_with = "lenient_int")]
    pub order: i64,
    /// Caller fields the engine does not interpret, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Decode one element of a snapshot. Non-objects become an empty record.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Record::default();
        }
        serde_json::from_value(value).unwrap_or_else(|err| {
            warn!(error = %err, "record could not be decoded, using defaults");
            Record::default()
        })
    }

    /// Integer year, 0 when the supplied value has no integer form
    pub fn year_num(&self) -> i64 {
        coerce_int(&self.year).unwrap_or(0)
    }
}

/// A record plus the lowercased and parsed fields queries compare against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    #[serde(flatten)]
    pub record: Record,
    pub title_lower: String,
    pub abstract_lower: String,
    pub conference_lower: String,
    pub year_num: i64,
}

impl NormalizedRecord {
    /// Wire names of the derived fields
    const DERIVED_FIELDS: [&'static str; 4] = ["titleLower", "abstractLower", "conferenceLower", "yearNum"];

    /// Caller fields sharing a derived field's name are dropped so the derived
    /// value is the only one serialized.
    pub fn from_record(mut record: Record) -> Self {
        for field in Self::DERIVED_FIELDS {
            record.extra.remove(field);
        }
        NormalizedRecord {
            title_lower: record.title.to_lowercase(),
            abstract_lower: record.abstract_text.to_lowercase(),
            conference_lower: record.conference.to_lowercase(),
            year_num: record.year_num(),
            record,
        }
    }
}
