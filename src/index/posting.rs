use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use roaring::RoaringBitmap;
use crate::core::types::DocId;

/// Set of document ids. Iterates in ascending id order.
pub type PostingSet = RoaringBitmap;

/// Postings table: key (token, label, year) → documents containing it
#[derive(Debug, Clone)]
pub struct PostingsTable<K: Eq + Hash> {
    pub postings: HashMap<K, PostingSet>,
}

impl<K: Eq + Hash> Default for PostingsTable<K> {
    fn default() -> Self {
        PostingsTable {
            postings: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> PostingsTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K, doc_id: DocId) {
        self.postings
            .entry(key)
            .or_default()
            .insert(doc_id.value());
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&PostingSet>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.postings.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &PostingSet)> {
        self.postings.iter()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total (key, document) pairs
    pub fn total_postings(&self) -> u64 {
        self.postings.values().map(|set| set.len()).sum()
    }

    /// Highest document id referenced by any posting
    pub fn max_doc(&self) -> Option<u32> {
        self.postings.values().filter_map(|set| set.max()).max()
    }
}
