use wisp_common::warning::warn_once;

use super::token::Token;

/// Splits document text into [`Token::Text`] and [`Token::Tag`].
///
/// One buffer is shared between text and markup; `in_tag` says which one it
/// is currently collecting:
///
/// - `<` flushes a non-empty buffer as text and starts a tag
/// - `>` emits the buffer as a tag, even when empty, and goes back to text
/// - every other character is appended to the buffer
///
/// A `>` seen while collecting text still closes "a tag": the text so far
/// becomes tag markup. A `<` seen inside a tag flushes the partial markup as
/// text. Both follow from the single-buffer design and are kept.
pub struct HTMLTokenizer {
    input: String,
    buffer: String,
    in_tag: bool,
    tokens: Vec<Token>,
    /// Markup of a tag still open at end of input, dropped without a token.
    truncated: Option<String>,
}

impl HTMLTokenizer {
    /// Create a tokenizer over the whole document.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            input,
            buffer: String::new(),
            in_tag: false,
            tokens: Vec::new(),
            truncated: None,
        }
    }

    /// Tokenize the input. The input is consumed; a second call emits nothing.
    pub fn run(&mut self) {
        let input = std::mem::take(&mut self.input);
        for c in input.chars() {
            match c {
                '<' => {
                    self.in_tag = true;
                    if !self.buffer.is_empty() {
                        let text = std::mem::take(&mut self.buffer);
                        self.tokens.push(Token::Text(text));
                    }
                }
                '>' => {
                    self.in_tag = false;
                    let markup = std::mem::take(&mut self.buffer);
                    self.tokens.push(Token::Tag(markup));
                }
                _ => self.buffer.push(c),
            }
        }
        self.finish();
    }

    fn finish(&mut self) {
        let rest = std::mem::take(&mut self.buffer);
        if self.in_tag {
            warn_once("HTML Tokenizer", "dropped unterminated tag at end of input");
            self.truncated = Some(rest);
        } else if !rest.is_empty() {
            self.tokens.push(Token::Text(rest));
        }
        self.in_tag = false;
    }

    /// Tokens produced so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Markup of an unterminated tag dropped at end of input, if any.
    #[must_use]
    pub fn truncated_tag(&self) -> Option<&str> {
        self.truncated.as_deref()
    }

    /// Hand over the token sequence.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

/// Tokenize a document in one call.
#[must_use]
pub fn tokenize(html: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}
