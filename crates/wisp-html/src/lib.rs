//! Tag-soup HTML tokenizer and tree builder for the Wisp renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - a single pass splitting markup between `<` and `>` from
//!   the text around it
//! - **Tree Builder** - a stack of open elements with implicit `html`/`head`/
//!   `body` insertion, void elements, and tolerance for unbalanced tags
//!
//! Neither stage fails on document text. Anything tolerated is recorded as a
//! [`ParseIssue`] and reported through `wisp_common::warning`.
//!
//! # Not Implemented
//!
//! - Character references (`&lt;` and friends stay literal)
//! - Foster parenting and table modes
//! - Script and style content models

/// Tree construction from a token stream.
pub mod parser;
/// Splitting raw text into text runs and tag markup.
pub mod tokenizer;

mod dump;

pub use dump::{format_tree, print_tree};
pub use parser::{HEAD_ELEMENTS, HTMLParser, ParseIssue, VOID_ELEMENTS, parse_tag};
pub use tokenizer::{HTMLTokenizer, Token, tokenize};

/// Tokenize and build a tree in one call.
#[must_use]
pub fn parse(html: &str) -> wisp_dom::DomTree {
    parse_with_issues(html).0
}

/// Tokenize and build a tree, keeping everything either stage tolerated,
/// including a tag left unterminated at end of input.
#[must_use]
pub fn parse_with_issues(html: &str) -> (wisp_dom::DomTree, Vec<ParseIssue>) {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    let truncated = tokenizer.truncated_tag().map(str::to_string);
    HTMLParser::new(tokenizer.into_tokens())
        .with_truncated_tag(truncated)
        .run_with_issues()
}
