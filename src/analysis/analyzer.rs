use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::length::MinLengthFilter;
use crate::analysis::filters::prefix::EdgePrefixFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::core::config::EngineConfig;

/// Text analysis pipeline
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name,
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Index terms for `text`: surviving tokens plus their prefixes
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).into_iter().map(|token| token.text).collect()
    }

    /// Whether every occurrence of `fragment` in analyzed text is guaranteed to sit
    /// inside some emitted term. When this holds, a scan of the term dictionary finds
    /// exactly the documents whose text contains `fragment`.
    pub fn covers(&self, fragment: &str) -> bool {
        !fragment.is_empty()
            && fragment.chars().all(|c| self.tokenizer.is_token_char(c))
            && !self.filters.iter().any(|filter| filter.may_drop(fragment))
    }

    /// Analyzer for paper titles and abstracts
    pub fn paper_text(config: &EngineConfig) -> Self {
        Analyzer::new("paper_text".to_string(),
                      Box::new(WordTokenizer::default()))
            .add_filter(Box::new(MinLengthFilter::new(config.min_token_len)))
            .add_filter(Box::new(StopWordFilter::english()))
            .add_filter(Box::new(EdgePrefixFilter::new(config.prefix_min_len, config.prefix_max_len)))
    }
}

impl Clone for Analyzer {
    fn clone(&self) -> Self {
        Analyzer {
            tokenizer: self.tokenizer.clone_box(),
            filters: self.filters.iter().map(|filter| filter.clone_box()).collect(),
            name: self.name.clone(),
        }
    }
}
