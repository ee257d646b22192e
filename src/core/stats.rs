use chrono::{DateTime, Utc};
use serde::Serialize;

/// Running counters kept by the engine across messages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStats {
    // Query metrics (cache misses only)
    pub total_searches: u64,
    pub average_search_time_ms: f64,
    pub cache_hits: u64,

    // Index metrics
    pub index_creation_time_ms: f64,
    pub last_index_size: usize,
}

impl EngineStats {
    pub fn record_search(&mut self, elapsed_ms: f64) {
        self.total_searches += 1;
        let n = self.total_searches as f64;
        self.average_search_time_ms = (self.average_search_time_ms * (n - 1.0) + elapsed_ms) / n;
    }

    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn record_index_build(&mut self, size: usize, elapsed_ms: f64) {
        self.last_index_size = size;
        self.index_creation_time_ms = elapsed_ms;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConferenceCount {
    pub conference: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConferenceYearCount {
    pub conference: String,
    pub year: i64,
    pub count: u64,
}

/// Facets of the loaded snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_papers: usize,
    pub conferences: Vec<String>,                           // Non-empty labels, A → Z
    pub years: Vec<i64>,                                    // Non-zero years, newest first
    pub conference_counts: Vec<ConferenceCount>,            // By label, A → Z
    pub year_counts: Vec<YearCount>,                        // Newest first
    pub conference_year_counts: Vec<ConferenceYearCount>,   // Label A → Z, then newest first
    pub generated_at: DateTime<Utc>,
}
