use std::sync::Arc;
use lru::LruCache;
use serde::Serialize;
use tracing::debug;
use crate::core::types::NormalizedRecord;
use crate::query::types::QueryKey;

pub type CachedResult = Vec<Arc<NormalizedRecord>>;

/// Query result cache with insertion-order eviction.
///
/// Reads use `peek`, so a hit never refreshes an entry: once more than
/// `high_water` entries are stored, the oldest insertions are dropped until
/// `retain` remain.
pub struct ResultCache {
    entries: LruCache<QueryKey, CachedResult>,
    pub high_water: usize,
    pub retain: usize,
    pub hit_count: usize,
    pub miss_count: usize,
    pub eviction_count: usize,
}

impl ResultCache {
    pub fn new(high_water: usize, retain: usize) -> Self {
        ResultCache {
            entries: LruCache::unbounded(),
            high_water,
            retain: retain.min(high_water),
            hit_count: 0,
            miss_count: 0,
            eviction_count: 0,
        }
    }

    pub fn get(&mut self, key: &QueryKey) -> Option<CachedResult> {
        if let Some(results) = self.entries.peek(key) {
            self.hit_count += 1;
            Some(results.clone())
        } else {
            self.miss_count += 1;
            None
        }
    }

    pub fn put(&mut self, key: QueryKey, results: CachedResult) {
        self.entries.put(key, results);

        if self.entries.len() > self.high_water {
            let before = self.entries.len();
            while self.entries.len() > self.retain {
                self.entries.pop_lru();
            }
            self.eviction_count += before - self.entries.len();
            debug!(evicted = before - self.entries.len(), retained = self.entries.len(), "result cache trimmed");
        }
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached keys, oldest insertion first
    pub fn keys(&self) -> impl Iterator<Item = &QueryKey> {
        self.entries.iter().rev().map(|(key, _)| key)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count,
            miss_count: self.miss_count,
            eviction_count: self.eviction_count,
            size: self.entries.len(),
            capacity: self.high_water,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub eviction_count: usize,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Record;

    fn key(i: usize) -> QueryKey {
        QueryKey { signature: format!("q{}", i) }
    }

    fn result(title: &str) -> CachedResult {
        let record = Record { title: title.to_string(), ..Record::default() };
        vec![Arc::new(NormalizedRecord::from_record(record))]
    }

    #[test]
    fn test_get_put() {
        let mut cache = ResultCache::new(100, 50);
        assert!(cache.get(&key(1)).is_none());
        cache.put(key(1), result("Deep Learning"));

        let hit = cache.get(&key(1)).unwrap();
        assert_eq!(hit[0].record.title, "Deep Learning");
        assert_eq!(cache.stats().hit_count, 1);
        assert_eq!(cache.stats().miss_count, 1);
        assert!((cache.stats().hit_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_holds_up_to_high_water() {
        let mut cache = ResultCache::new(100, 50);
        for i in 0..100 {
            cache.put(key(i), Vec::new());
        }
        assert_eq!(cache.len(), 100);
        assert_eq!(cache.stats().eviction_count, 0);
    }

    #[test]
    fn test_eviction_keeps_most_recent_insertions() {
        let mut cache = ResultCache::new(100, 50);
        for i in 0..101 {
            cache.put(key(i), Vec::new());
        }

        assert_eq!(cache.len(), 50);
        let kept: Vec<QueryKey> = cache.keys().cloned().collect();
        let expected: Vec<QueryKey> = (51..101).map(key).collect();
        assert_eq!(kept, expected);
        assert_eq!(cache.stats().eviction_count, 51);
    }

    #[test]
    fn test_reads_do_not_protect_old_entries() {
        let mut cache = ResultCache::new(100, 50);
        for i in 0..100 {
            cache.put(key(i), Vec::new());
        }
        // Touch the oldest entry; insertion order still decides eviction.
        assert!(cache.get(&key(0)).is_some());
        cache.put(key(100), Vec::new());

        assert!(!cache.contains(&key(0)));
        assert!(cache.contains(&key(100)));
        assert!(cache.contains(&key(51)));
        assert!(!cache.contains(&key(50)));
    }

    #[test]
    fn test_never_exceeds_high_water() {
        let mut cache = ResultCache::new(100, 50);
        for i in 0..1000 {
            cache.put(key(i), Vec::new());
            assert!(cache.len() <= 100);
        }
    }

    #[test]
    fn test_clear() {
        let mut cache = ResultCache::new(100, 50);
        cache.put(key(1), Vec::new());
        cache.clear();
        assert!(cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
