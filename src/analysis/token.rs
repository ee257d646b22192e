/// Token representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,      // The token text
    pub position: u32,     // Position in the field
    pub offset: usize,     // Byte offset in the analyzed text
    pub length: usize,     // Token length in bytes
}

impl Token {
    pub fn new(text: String, position: u32, offset: usize) -> Self {
        let length = text.len();
        Token {
            text,
            position,
            offset,
            length,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
