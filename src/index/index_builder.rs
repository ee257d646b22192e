use std::sync::Arc;
use std::time::Instant;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info};
use crate::analysis::analyzer::Analyzer;
use crate::core::config::EngineConfig;
use crate::core::error::{Error, Result};
use crate::core::types::{NormalizedRecord, Record};
use crate::index::inverted::PaperIndex;

/// Builds a [`PaperIndex`] from a full snapshot of records.
///
/// Records are processed in fixed-size batches. Analysis of a batch may run on the
/// rayon pool, but postings are always merged in arrival order, so the resulting
/// index does not depend on batch size or parallelism.
pub struct IndexBuilder {
    pub analyzer: Arc<Analyzer>,
    pub batch_size: usize,
    pub progress_log_interval: usize,
    pub parallel: bool,
}

/// One record after analysis, ready to be merged into the index
struct AnalyzedRecord {
    record: NormalizedRecord,
    title_terms: Vec<String>,
    abstract_terms: Vec<String>,
}

impl IndexBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        IndexBuilder {
            analyzer: Arc::new(Analyzer::paper_text(config)),
            batch_size: config.index_batch_size.max(1),
            progress_log_interval: config.progress_log_interval,
            parallel: config.parallel_analysis,
        }
    }

    /// Build from a decoded JSON snapshot. Fails only if `papers` is not an array.
    pub fn build_from_value(&self, papers: Value) -> Result<PaperIndex> {
        match papers {
            Value::Array(items) => {
                let records = items.into_iter().map(Record::from_value).collect();
                self.build(records)
            }
            other => Err(Error::invalid_input(format!(
                "papers must be an array, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn build(&self, records: Vec<Record>) -> Result<PaperIndex> {
        let total = records.len();
        if total > u32::MAX as usize {
            return Err(Error::invalid_input(format!(
                "snapshot of {} records exceeds the document id space",
                total
            )));
        }

        info!(papers = total, "building search index");
        let start = Instant::now();

        let mut index = PaperIndex::new();
        index.records.reserve(total);

        let mut remaining = records.into_iter();
        let mut processed = 0usize;

        loop {
            let batch: Vec<Record> = remaining.by_ref().take(self.batch_size).collect();
            if batch.is_empty() {
                break;
            }
            let batch_len = batch.len();

            for analyzed in self.analyze_batch(batch) {
                index.add_record(analyzed.record, analyzed.title_terms, analyzed.abstract_terms);
            }

            processed += batch_len;
            if self.crossed_progress_mark(processed, batch_len) && processed < total {
                debug!(processed, total, "index build progress");
            }
        }

        info!(
            papers = index.len(),
            title_terms = index.title_postings.len(),
            abstract_terms = index.abstract_postings.len(),
            conferences = index.conference_postings.len(),
            years = index.year_postings.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "search index built"
        );

        Ok(index)
    }

    fn analyze_batch(&self, batch: Vec<Record>) -> Vec<AnalyzedRecord> {
        if self.parallel {
            batch.into_par_iter().map(|record| self.analyze_record(record)).collect()
        } else {
            batch.into_iter().map(|record| self.analyze_record(record)).collect()
        }
    }

    fn analyze_record(&self, record: Record) -> AnalyzedRecord {
        let record = NormalizedRecord::from_record(record);
        let title_terms = self.analyzer.terms(&record.title_lower);
        let abstract_terms = self.analyzer.terms(&record.abstract_lower);

        AnalyzedRecord {
            record,
            title_terms,
            abstract_terms,
        }
    }

    fn crossed_progress_mark(&self, processed: usize, batch_len: usize) -> bool {
        let interval = self.progress_log_interval;
        interval > 0 && processed / interval > (processed - batch_len) / interval
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::core::error::ErrorKind;
    use crate::core::types::DocId;

    fn builder() -> IndexBuilder {
        IndexBuilder::new(&EngineConfig::default())
    }

    fn sample() -> Value {
        json!([
            {"id": 1, "conference": "CVPR", "year": "2023", "title": "Deep Learning", "abstract": "We study deep nets."},
            {"id": 2, "conference": "CVPR", "year": 2024, "title": "Graph Networks"},
            {"id": 3, "conference": "ICCV", "year": "2023", "title": "Deep Fusion", "abstract": null}
        ])
    }

    fn docs(set: Option<&crate::index::posting::PostingSet>) -> Vec<u32> {
        set.map(|s| s.iter().collect()).unwrap_or_default()
    }

    #[test]
    fn test_build_assigns_sequential_ids() {
        let index = builder().build_from_value(sample()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.record(DocId(0)).unwrap().record.id, json!(1));
        assert_eq!(index.record(DocId(2)).unwrap().record.id, json!(3));
        assert!(index.record(DocId(3)).is_none());
    }

    #[test]
    fn test_build_populates_postings() {
        let index = builder().build_from_value(sample()).unwrap();

        assert_eq!(docs(index.title_postings.get("deep")), vec![0, 2]);
        assert_eq!(docs(index.title_postings.get("dee")), vec![0, 2]);
        assert_eq!(docs(index.title_postings.get("netw")), vec![1]);
        assert_eq!(docs(index.abstract_postings.get("study")), vec![0]);
        assert_eq!(docs(index.conference_postings.get("CVPR")), vec![0, 1]);
        assert_eq!(docs(index.year_postings.get(&2023_i64)), vec![0, 2]);
        assert_eq!(docs(index.year_postings.get(&2024_i64)), vec![1]);
    }

    #[test]
    fn test_postings_reference_valid_documents() {
        let index = builder().build_from_value(sample()).unwrap();
        let len = index.len() as u32;
        for table in [&index.title_postings, &index.abstract_postings, &index.conference_postings] {
            assert!(table.max_doc().unwrap() < len);
        }
        assert!(index.year_postings.max_doc().unwrap() < len);
    }

    #[test]
    fn test_build_tolerates_malformed_records() {
        let index = builder()
            .build_from_value(json!([42, {"year": "n/a"}, {"title": ["x"]}]))
            .unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(docs(index.year_postings.get(&0_i64)), vec![0, 1, 2]);
        assert_eq!(docs(index.conference_postings.get("")), vec![0, 1, 2]);
        assert!(index.title_postings.is_empty());
    }

    #[test]
    fn test_build_rejects_non_array() {
        let err = builder().build_from_value(json!({"papers": []})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert!(err.context.contains("object"));
    }

    #[test]
    fn test_batch_size_and_parallelism_do_not_change_index() {
        let records: Vec<Record> = (0..2500)
            .map(|i| Record {
                title: format!("Paper {} on topic{}", i, i % 7),
                conference: format!("CONF{}", i % 3),
                year: json!(2000 + (i % 20)),
                ..Record::default()
            })
            .collect();

        let sequential = IndexBuilder {
            batch_size: 1,
            parallel: false,
            ..builder()
        }
        .build(records.clone())
        .unwrap();
        let parallel = builder().build(records).unwrap();

        assert_eq!(sequential.len(), parallel.len());
        for (term, docs) in sequential.title_postings.iter() {
            assert_eq!(parallel.title_postings.get(term), Some(docs));
        }
        assert_eq!(sequential.title_postings.len(), parallel.title_postings.len());
    }

    #[test]
    fn test_collection_stats() {
        let index = builder()
            .build_from_value(json!([
                {"conference": "CVPR", "year": 2023},
                {"conference": "CVPR", "year": 2024},
                {"conference": "ICCV", "year": 2023},
                {"conference": "", "year": "unknown"}
            ]))
            .unwrap();
        let stats = index.collection_stats();

        assert_eq!(stats.total_papers, 4);
        assert_eq!(stats.conferences, vec!["CVPR", "ICCV"]);
        assert_eq!(stats.years, vec![2024, 2023]);
        assert_eq!(stats.conference_counts[1].conference, "CVPR");
        assert_eq!(stats.conference_counts[1].count, 2);
        assert_eq!(stats.year_counts[0].year, 2024);

        let pairs: Vec<(String, i64, u64)> = stats.conference_year_counts
            .into_iter()
            .map(|c| (c.conference, c.year, c.count))
            .collect();
        assert_eq!(pairs, vec![
            ("".to_string(), 0, 1),
            ("CVPR".to_string(), 2024, 1),
            ("CVPR".to_string(), 2023, 1),
            ("ICCV".to_string(), 2023, 1),
        ]);
    }
}
