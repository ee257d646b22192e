use std::sync::LazyLock;
use regex::Regex;
use crate::analysis::token::Token;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Whether `c` can appear inside a token this tokenizer emits
    fn is_token_char(&self, c: char) -> bool;

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

/// Maximal runs of ASCII word characters and hyphens. Everything else, including
/// non-ASCII letters, separates tokens.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_-]+").expect("word pattern is valid"));

/// Splits on anything that is not an ASCII letter, digit, underscore or hyphen
#[derive(Clone)]
pub struct WordTokenizer {
    pub lowercase: bool,
}

impl Default for WordTokenizer {
    fn default() -> Self {
        WordTokenizer { lowercase: true }
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let text_to_process = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        WORD_PATTERN
            .find_iter(&text_to_process)
            .enumerate()
            .map(|(position, word)| {
                Token::new(word.as_str().to_string(), position as u32, word.start())
            })
            .collect()
    }

    fn is_token_char(&self, c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    }

    fn name(&self) -> &str {
        "word"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}
