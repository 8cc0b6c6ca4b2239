//! HTML parser module for tree construction.

/// Splitting tag markup into a name and attributes.
pub mod attributes;
/// Stack-of-open-elements tree builder.
pub mod core;

pub use self::core::{HEAD_ELEMENTS, HTMLParser, ParseIssue, VOID_ELEMENTS};
pub use attributes::parse_tag;
