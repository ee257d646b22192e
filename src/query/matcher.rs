use crate::analysis::analyzer::Analyzer;
use crate::index::inverted::{PaperIndex, TextField};
use crate::index::posting::PostingSet;

/// Substring keyword matching over a candidate set.
///
/// The term dictionary is tried first: every indexed term containing the keyword
/// contributes its postings. If that finds nothing, or the keyword could occur in
/// text the analyzer never indexed (separators, stop words, short tokens), the
/// candidates' lowercased text is scanned directly.
pub struct KeywordMatcher<'a> {
    pub index: &'a PaperIndex,
    pub analyzer: &'a Analyzer,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(index: &'a PaperIndex, analyzer: &'a Analyzer) -> Self {
        KeywordMatcher { index, analyzer }
    }

    /// Candidates whose `field` text contains `keyword` (already lowercased)
    pub fn matching(&self, field: TextField, keyword: &str, candidates: &PostingSet) -> PostingSet {
        if self.analyzer.covers(keyword) {
            let matched = self.lookup(field, keyword, candidates);
            if !matched.is_empty() {
                return matched;
            }
        }

        self.scan(field, keyword, candidates)
    }

    /// Union of postings for every indexed term containing `keyword`, restricted to
    /// `candidates`
    pub fn lookup(&self, field: TextField, keyword: &str, candidates: &PostingSet) -> PostingSet {
        let mut matched = PostingSet::new();
        for (term, docs) in self.index.text_postings(field).iter() {
            if term.contains(keyword) {
                matched |= docs;
            }
        }
        matched &= candidates;
        matched
    }

    /// Direct substring test against each candidate's text
    pub fn scan(&self, field: TextField, keyword: &str, candidates: &PostingSet) -> PostingSet {
        candidates
            .iter()
            .filter(|&doc| {
                self.index
                    .records
                    .get(doc as usize)
                    .is_some_and(|record| field.text(record).contains(keyword))
            })
            .collect()
    }
}
