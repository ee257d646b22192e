use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Emits every token plus its leading prefixes of `min_len..=max_len` characters.
/// Only tokens longer than `min_len` get prefixes; a prefix equal to the whole
/// token is not repeated.
pub struct EdgePrefixFilter {
    pub min_len: usize,
    pub max_len: usize,
}

impl EdgePrefixFilter {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        EdgePrefixFilter { min_len, max_len }
    }
}

impl TokenFilter for EdgePrefixFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut result = Vec::with_capacity(tokens.len() * 2);

        for token in tokens {
            let char_len = token.char_len();

            if char_len > self.min_len {
                for n in self.min_len..=self.max_len.min(char_len - 1) {
                    let end = token.text
                        .char_indices()
                        .nth(n)
                        .map(|(idx, _)| idx)
                        .unwrap_or(token.text.len());
                    let prefix = token.text[..end].to_string();

                    result.push(Token {
                        length: prefix.len(),
                        text: prefix,
                        position: token.position,
                        offset: token.offset,
                    });
                }
            }

            result.push(token);
        }

        result
    }

    fn name(&self) -> &str {
        "edge_prefix"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(EdgePrefixFilter {
            min_len: self.min_len,
            max_len: self.max_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(word: &str) -> Vec<String> {
        EdgePrefixFilter::new(3, 6)
            .filter(vec![Token::new(word.into(), 0, 0)])
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_long_token_gets_prefixes_up_to_six() {
        assert_eq!(
            expand("transformer"),
            vec!["tra", "tran", "trans", "transf", "transformer"]
        );
    }

    #[test]
    fn test_prefixes_stop_before_full_token() {
        assert_eq!(expand("graph"), vec!["gra", "grap", "graph"]);
        assert_eq!(expand("neural"), vec!["neu", "neur", "neura", "neural"]);
    }

    #[test]
    fn test_short_tokens_unchanged() {
        assert_eq!(expand("gan"), vec!["gan"]);
        assert_eq!(expand("ml"), vec!["ml"]);
    }
}
