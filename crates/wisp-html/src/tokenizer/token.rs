use std::fmt;

/// One unit of tokenizer output.
///
/// The tokenizer does not look inside tags; splitting markup into a tag name
/// and attributes is the tree builder's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of characters outside any tag.
    Text(String),
    /// Raw markup between `<` and `>`, without the brackets. May be empty.
    Tag(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "Text({text:?})"),
            Self::Tag(markup) => write!(f, "Tag(<{markup}>)"),
        }
    }
}
