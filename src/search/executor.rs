use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use crate::analysis::analyzer::Analyzer;
use crate::core::error::Result;
use crate::core::types::NormalizedRecord;
use crate::index::inverted::{PaperIndex, TextField};
use crate::index::posting::PostingSet;
use crate::query::cache::ResultCache;
use crate::query::matcher::KeywordMatcher;
use crate::query::types::SearchQuery;
use crate::search::results::SearchResults;

/// Evaluates structured queries against a [`PaperIndex`].
///
/// Filters run in a fixed order (conference, year, title keywords, abstract
/// keywords), each narrowing the candidate set, and evaluation stops as soon as
/// the set is empty.
pub struct QueryExecutor {
    pub analyzer: Arc<Analyzer>,
}

impl QueryExecutor {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        QueryExecutor { analyzer }
    }

    /// Cache-aware evaluation. Results come back in document order.
    pub fn execute(&self, query: &SearchQuery, index: &PaperIndex, cache: &mut ResultCache) -> Result<SearchResults> {
        let start = Instant::now();
        let key = query.key()?;

        if let Some(records) = cache.get(&key) {
            debug!(hits = records.len(), "search served from cache");
            return Ok(SearchResults {
                total_hits: records.len(),
                records,
                took_ms: start.elapsed().as_secs_f64() * 1000.0,
                from_cache: true,
            });
        }

        let records = self.evaluate(query, index);
        cache.put(key, records.clone());

        let took_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(hits = records.len(), took_ms, "search evaluated");

        Ok(SearchResults {
            total_hits: records.len(),
            records,
            took_ms,
            from_cache: false,
        })
    }

    pub fn evaluate(&self, query: &SearchQuery, index: &PaperIndex) -> Vec<Arc<NormalizedRecord>> {
        index.records_for(&self.candidates(query, index))
    }

    /// Document ids matching every filter of `query`
    pub fn candidates(&self, query: &SearchQuery, index: &PaperIndex) -> PostingSet {
        let mut candidates = match self.filter_conferences(query, index) {
            Some(docs) => docs,
            None => return PostingSet::new(),
        };
        if candidates.is_empty() {
            return candidates;
        }

        candidates = self.filter_years(query, index, &candidates);
        if candidates.is_empty() {
            return candidates;
        }

        let matcher = KeywordMatcher::new(index, &self.analyzer);
        for (field, keywords) in [
            (TextField::Title, &query.title_keywords),
            (TextField::Abstract, &query.abstract_keywords),
        ] {
            for keyword in keywords {
                let keyword = keyword.to_lowercase();
                candidates = matcher.matching(field, &keyword, &candidates);
                if candidates.is_empty() {
                    debug!(?field, keyword = %keyword, "keyword left no candidates");
                    return candidates;
                }
            }
        }

        candidates
    }

    /// First listed conference with postings seeds the set, later ones intersect
    /// it; labels with no postings are skipped. `None` when no label matched.
    /// An empty selection leaves every document in play.
    fn filter_conferences(&self, query: &SearchQuery, index: &PaperIndex) -> Option<PostingSet> {
        if query.selected_conferences.is_empty() {
            return Some(index.all_docs());
        }

        let mut candidates: Option<PostingSet> = None;
        for conference in &query.selected_conferences {
            if let Some(docs) = index.conference_postings.get(conference.as_str()) {
                match candidates.as_mut() {
                    None => candidates = Some(docs.clone()),
                    Some(current) => *current &= docs,
                }
            }
        }
        candidates
    }

    /// Inclusive year range; a query without a usable range keeps nothing
    fn filter_years(&self, query: &SearchQuery, index: &PaperIndex, candidates: &PostingSet) -> PostingSet {
        let Some((start, end)) = query.year_range() else {
            debug!(start = ?query.start_year, end = ?query.end_year, "query has no usable year range");
            return PostingSet::new();
        };
        candidates
            .iter()
            .filter(|&doc| {
                index
                    .records
                    .get(doc as usize)
                    .is_some_and(|record| record.year_num >= start && record.year_num <= end)
            })
            .collect()
    }
}
