use std::collections::HashSet;
use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

pub struct StopWordFilter {
    pub stop_words: HashSet<String>,
}

impl StopWordFilter {
    pub fn new(stop_words: Vec<String>) -> Self {
        StopWordFilter {
            stop_words: stop_words.into_iter().collect(),
        }
    }

    pub fn english() -> Self {
        let words = vec![
            "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
            "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
            "will", "would", "could", "should", "may", "might", "can", "must", "shall",
            "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they",
            "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their",
        ].into_iter().map(String::from).collect();

        StopWordFilter::new(words)
    }
}

impl TokenFilter for StopWordFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .filter(|token| !self.stop_words.contains(&token.text))
            .collect()
    }

    fn may_drop(&self, fragment: &str) -> bool {
        self.stop_words.iter().any(|word| word.contains(fragment))
    }

    fn name(&self) -> &str {
        "stop_words"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(StopWordFilter {
            stop_words: self.stop_words.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_function_words() {
        let tokens = vec![
            Token::new("learning".into(), 0, 0),
            Token::new("with".into(), 1, 9),
            Token::new("their".into(), 2, 14),
            Token::new("graphs".into(), 3, 20),
        ];
        let kept: Vec<String> = StopWordFilter::english()
            .filter(tokens)
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(kept, vec!["learning", "graphs"]);
    }

    #[test]
    fn test_may_drop_fragments_of_stop_words() {
        let filter = StopWordFilter::english();
        assert!(filter.may_drop("the"));
        assert!(filter.may_drop("hou")); // should
        assert!(!filter.may_drop("graph"));
    }
}
