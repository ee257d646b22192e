use std::sync::Arc;
use crate::core::types::NormalizedRecord;

/// Search results container
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub records: Vec<Arc<NormalizedRecord>>,
    pub total_hits: usize,
    pub took_ms: f64,        // Evaluation time, sorting excluded
    pub from_cache: bool,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
