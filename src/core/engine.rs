use std::time::Instant;
use serde_json::Value;
use tracing::{debug, info};
use crate::core::config::EngineConfig;
use crate::core::error::{Error, Result};
use crate::core::stats::{CollectionStats, EngineStats};
use crate::core::types::Record;
use crate::index::index_builder::IndexBuilder;
use crate::index::inverted::PaperIndex;
use crate::query::cache::{CacheStats, ResultCache};
use crate::query::types::{SearchQuery, SortKey, SortOrder};
use crate::search::executor::QueryExecutor;
use crate::search::results::SearchResults;
use crate::search::sort::ResultSorter;

pub struct SearchEngine {
    config: EngineConfig,

    builder: IndexBuilder,
    executor: QueryExecutor,

    index: Option<PaperIndex>,   // None until the first snapshot loads
    cache: ResultCache,
    stats: EngineStats,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: EngineConfig) -> Self {
        let builder = IndexBuilder::new(&config);
        let executor = QueryExecutor::new(builder.analyzer.clone());
        let cache = ResultCache::new(config.cache_high_water, config.cache_retain);

        SearchEngine {
            config,
            builder,
            executor,
            index: None,
            cache,
            stats: EngineStats::default(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<&PaperIndex> {
        self.index.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the index with one built from `records`. Returns the record count.
    pub fn load(&mut self, records: Vec<Record>) -> Result<usize> {
        let start = Instant::now();
        let index = self.builder.build(records)?;
        self.install(index, start)
    }

    /// Like [`load`](Self::load), from a decoded JSON array. On error the
    /// previous index stays in place.
    pub fn load_value(&mut self, papers: Value) -> Result<usize> {
        let start = Instant::now();
        let index = self.builder.build_from_value(papers)?;
        self.install(index, start)
    }

    fn install(&mut self, index: PaperIndex, start: Instant) -> Result<usize> {
        let count = index.len();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.index = Some(index);
        self.stats.record_index_build(count, elapsed_ms);

        if self.config.clear_cache_on_reload && !self.cache.is_empty() {
            debug!(entries = self.cache.len(), "dropping cached results from previous snapshot");
            self.cache.clear();
        }

        info!(papers = count, elapsed_ms, "snapshot loaded");
        Ok(count)
    }

    /// Evaluate `query` and order the matches. Fails with `NotReady` until a
    /// snapshot has been loaded.
    pub fn search(&mut self, query: &SearchQuery, key: SortKey, order: SortOrder) -> Result<SearchResults> {
        let index = self
            .index
            .as_ref()
            .ok_or_else(|| Error::not_ready("search index not initialized, load papers first"))?;

        let mut results = self.executor.execute(query, index, &mut self.cache)?;
        if results.from_cache {
            self.stats.record_cache_hit();
        } else {
            self.stats.record_search(results.took_ms);
        }

        ResultSorter::sort(&mut results.records, key, order);
        Ok(results)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn engine_stats(&self) -> &EngineStats {
        &self.stats
    }

    /// `None` before the first snapshot
    pub fn collection_stats(&self) -> Option<CollectionStats> {
        self.index.as_ref().map(PaperIndex::collection_stats)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::from_validated(EngineConfig::default())
    }
}
