//! HTML tokenizer module.

/// Tokenizer state machine.
pub mod core;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, tokenize};
pub use token::Token;
