use crate::analysis::token::Token;

pub trait TokenFilter: Send + Sync {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token>;

    /// True if this filter could remove a token that contains `fragment`.
    /// Filters that only add or rewrite tokens keep the default.
    fn may_drop(&self, _fragment: &str) -> bool {
        false
    }

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn TokenFilter>;
}
