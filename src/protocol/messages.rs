use std::sync::Arc;
use serde::Serialize;
use serde_json::{json, Map, Value};
use crate::core::error::{Error, Result};
use crate::core::stats::{CollectionStats, EngineStats};
use crate::core::types::{NormalizedRecord, Record};
use crate::query::cache::CacheStats;
use crate::query::types::{SearchQuery, SortKey, SortOrder};

/// Inbound message. On the wire: `{"type": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    UpdatePapers {
        papers: Option<Value>,
    },
    Search {
        search_params: Option<Value>,
        sort_by: Option<String>,
        sort_direction: Option<String>,
    },
    ClearCache,
    GetStats,
    Unknown {
        message_type: String,
    },
}

impl Request {
    /// Decode an envelope. Never fails: anything unrecognised becomes
    /// [`Request::Unknown`] and missing payload fields are left for the handler
    /// to reject.
    pub fn from_value(message: Value) -> Self {
        let (message_type, data) = match message {
            Value::Object(mut envelope) => {
                let data = match envelope.remove("data") {
                    Some(Value::Object(data)) => data,
                    _ => Map::new(),
                };
                (envelope.remove("type"), data)
            }
            _ => (None, Map::new()),
        };

        match message_type {
            Some(Value::String(name)) => Self::named(name, data),
            Some(other) => Request::Unknown { message_type: other.to_string() },
            None => Request::Unknown { message_type: "undefined".to_string() },
        }
    }

    fn named(name: String, mut data: Map<String, Value>) -> Self {
        match name.as_str() {
            "updatePapers" => Request::UpdatePapers {
                papers: data.remove("papers"),
            },
            "search" => Request::Search {
                search_params: data.remove("searchParams").filter(|params| !params.is_null()),
                sort_by: non_empty_str(data.remove("sortBy")),
                sort_direction: non_empty_str(data.remove("sortDirection")),
            },
            "clearCache" => Request::ClearCache,
            "getStats" => Request::GetStats,
            _ => Request::Unknown { message_type: name },
        }
    }

    pub fn update_papers(papers: &[Record]) -> Result<Self> {
        Ok(Request::UpdatePapers {
            papers: Some(serde_json::to_value(papers)?),
        })
    }

    pub fn search(query: &SearchQuery, sort_by: Option<SortKey>, sort_direction: Option<SortOrder>) -> Result<Self> {
        Ok(Request::Search {
            search_params: Some(serde_json::to_value(query)?),
            sort_by: sort_by.map(|key| key.as_str().to_string()),
            sort_direction: sort_direction.map(|order| order.as_str().to_string()),
        })
    }

    pub fn message_type(&self) -> &str {
        match self {
            Request::UpdatePapers { .. } => "updatePapers",
            Request::Search { .. } => "search",
            Request::ClearCache => "clearCache",
            Request::GetStats => "getStats",
            Request::Unknown { message_type } => message_type.as_str(),
        }
    }

    /// Encode as a wire envelope
    pub fn to_value(&self) -> Value {
        let mut data = Map::new();
        match self {
            Request::UpdatePapers { papers } => {
                if let Some(papers) = papers {
                    data.insert("papers".to_string(), papers.clone());
                }
            }
            Request::Search { search_params, sort_by, sort_direction } => {
                if let Some(params) = search_params {
                    data.insert("searchParams".to_string(), params.clone());
                }
                if let Some(sort_by) = sort_by {
                    data.insert("sortBy".to_string(), Value::String(sort_by.clone()));
                }
                if let Some(direction) = sort_direction {
                    data.insert("sortDirection".to_string(), Value::String(direction.clone()));
                }
            }
            Request::ClearCache | Request::GetStats | Request::Unknown { .. } => {}
        }

        json!({ "type": self.message_type(), "data": data })
    }
}

fn non_empty_str(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Outbound message, serialized flat with a `type` tag. Absent optional fields
/// are omitted.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Response {
    PapersUpdated {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    SearchResult {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        results: Option<Vec<Arc<NormalizedRecord>>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        search_time: Option<f64>,   // Milliseconds, evaluation only
        #[serde(skip_serializing_if = "Option::is_none")]
        search_params: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    CacheCleared {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    StatsResult {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        engine: Option<EngineStats>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cache: Option<CacheStats>,
        #[serde(skip_serializing_if = "Option::is_none")]
        collection: Option<CollectionStats>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Error {
        success: bool,
        error: String,
    },
}

impl Response {
    pub fn papers_failed(err: &Error) -> Self {
        Response::PapersUpdated { success: false, count: None, error: Some(err.to_string()) }
    }

    pub fn search_failed(err: &Error) -> Self {
        Response::SearchResult {
            success: false,
            results: None,
            count: None,
            search_time: None,
            search_params: None,
            error: Some(err.to_string()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Response::Error { success: false, error: error.into() }
    }

    pub fn message_type(&self) -> &'static str {
        match self {
            Response::PapersUpdated { .. } => "papersUpdated",
            Response::SearchResult { .. } => "searchResult",
            Response::CacheCleared { .. } => "cacheCleared",
            Response::StatsResult { .. } => "statsResult",
            Response::Error { .. } => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Response::PapersUpdated { success, .. }
            | Response::SearchResult { success, .. }
            | Response::CacheCleared { success, .. }
            | Response::StatsResult { success, .. }
            | Response::Error { success, .. } => *success,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Response::PapersUpdated { error, .. }
            | Response::SearchResult { error, .. }
            | Response::CacheCleared { error, .. }
            | Response::StatsResult { error, .. } => error.as_deref(),
            Response::Error { error, .. } => Some(error.as_str()),
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
