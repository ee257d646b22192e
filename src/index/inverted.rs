use std::collections::BTreeMap;
use std::sync::Arc;
use chrono::Utc;
use crate::core::stats::{CollectionStats, ConferenceCount, ConferenceYearCount, YearCount};
use crate::core::types::{DocId, NormalizedRecord};
use crate::index::posting::{PostingSet, PostingsTable};

/// Free-text fields that carry token postings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Abstract,
}

impl TextField {
    /// Lowercased field text of a record
    pub fn text(self, record: &NormalizedRecord) -> &str {
        match self {
            TextField::Title => &record.title_lower,
            TextField::Abstract => &record.abstract_lower,
        }
    }
}

/// Inverted index over one snapshot of papers.
///
/// Document ids are positions in `records`; every id in every postings table is a
/// valid position. Built once by [`IndexBuilder`](crate::index::index_builder::IndexBuilder)
/// and read-only afterwards.
#[derive(Debug, Default)]
pub struct PaperIndex {
    pub records: Vec<Arc<NormalizedRecord>>,
    pub title_postings: PostingsTable<String>,
    pub abstract_postings: PostingsTable<String>,
    pub conference_postings: PostingsTable<String>,
    pub year_postings: PostingsTable<i64>,
}

impl PaperIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record with its analyzed terms and return its id
    pub(crate) fn add_record(
        &mut self,
        record: NormalizedRecord,
        title_terms: Vec<String>,
        abstract_terms: Vec<String>,
    ) -> DocId {
        let doc_id = DocId(self.records.len() as u32);

        for term in title_terms {
            self.title_postings.add(term, doc_id);
        }
        for term in abstract_terms {
            self.abstract_postings.add(term, doc_id);
        }
        self.conference_postings.add(record.record.conference.clone(), doc_id);
        self.year_postings.add(record.year_num, doc_id);

        self.records.push(Arc::new(record));
        doc_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, doc_id: DocId) -> Option<&Arc<NormalizedRecord>> {
        self.records.get(doc_id.as_index())
    }

    pub fn text_postings(&self, field: TextField) -> &PostingsTable<String> {
        match field {
            TextField::Title => &self.title_postings,
            TextField::Abstract => &self.abstract_postings,
        }
    }

    /// Every document id in the index
    pub fn all_docs(&self) -> PostingSet {
        let mut docs = PostingSet::new();
        docs.insert_range(0..self.records.len() as u32);
        docs
    }

    /// Records for `docs`, in ascending id order
    pub fn records_for(&self, docs: &PostingSet) -> Vec<Arc<NormalizedRecord>> {
        docs.iter()
            .filter_map(|doc| self.records.get(doc as usize).cloned())
            .collect()
    }

    pub fn collection_stats(&self) -> CollectionStats {
        let mut conference_counts: Vec<ConferenceCount> = self.conference_postings
            .iter()
            .map(|(conference, docs)| ConferenceCount {
                conference: conference.clone(),
                count: docs.len(),
            })
            .collect();
        conference_counts.sort_by(|a, b| a.conference.cmp(&b.conference));

        let mut year_counts: Vec<YearCount> = self.year_postings
            .iter()
            .map(|(year, docs)| YearCount { year: *year, count: docs.len() })
            .collect();
        year_counts.sort_by(|a, b| b.year.cmp(&a.year));

        let mut pairs: BTreeMap<(&str, std::cmp::Reverse<i64>), u64> = BTreeMap::new();
        for record in &self.records {
            *pairs
                .entry((record.record.conference.as_str(), std::cmp::Reverse(record.year_num)))
                .or_insert(0) += 1;
        }
        let conference_year_counts = pairs
            .into_iter()
            .map(|((conference, year), count)| ConferenceYearCount {
                conference: conference.to_string(),
                year: year.0,
                count,
            })
            .collect();

        CollectionStats {
            total_papers: self.records.len(),
            conferences: conference_counts
                .iter()
                .filter(|c| !c.conference.is_empty())
                .map(|c| c.conference.clone())
                .collect(),
            years: year_counts.iter().map(|y| y.year).filter(|year| *year != 0).collect(),
            conference_counts,
            year_counts,
            conference_year_counts,
            generated_at: Utc::now(),
        }
    }
}
