use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Drops tokens shorter than `min_len` characters
pub struct MinLengthFilter {
    pub min_len: usize,
}

impl MinLengthFilter {
    pub fn new(min_len: usize) -> Self {
        MinLengthFilter { min_len }
    }
}

impl TokenFilter for MinLengthFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .filter(|token| token.char_len() >= self.min_len)
            .collect()
    }

    // A fragment shorter than the limit may live inside a dropped token
    fn may_drop(&self, fragment: &str) -> bool {
        fragment.chars().count() < self.min_len
    }

    fn name(&self) -> &str {
        "min_length"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(MinLengthFilter { min_len: self.min_len })
    }
}
