use strum_macros::{AsRefStr, Display};

use wisp_common::warning::warn_once;
use wisp_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use super::attributes::parse_tag;
use crate::tokenizer::Token;

/// Elements that never have children. They are attached to the current
/// element as soon as they are seen and never pushed on the stack.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements that belong in `<head>`. Seeing one right after `<html>` opens an
/// implicit `<head>` instead of an implicit `<body>`.
pub const HEAD_ELEMENTS: &[&str] = &[
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

fn is_head_element(tag: &str) -> bool {
    HEAD_ELEMENTS.contains(&tag)
}

/// Something the parser tolerated instead of failing on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream, or the stream length for end-of-input.
    pub token_index: usize,
}

/// A structural step synthesized by implicit-tag insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
enum ImplicitTag {
    Html,
    Head,
    Body,
    /// Close the implicit (or explicit) `<head>`.
    #[strum(serialize = "/head")]
    CloseHead,
}

/// Builds a [`DomTree`] from a token stream.
///
/// The builder keeps a stack of open elements. An element is allocated in the
/// arena when it opens but only joins its parent's child list when it is
/// popped, so child order follows the order elements are finished.
pub struct HTMLParser {
    stack_of_open_elements: Vec<NodeId>,

    tree: DomTree,

    tokens: Vec<Token>,

    /// Current position in token stream.
    token_index: usize,

    issues: Vec<ParseIssue>,

    /// Markup the tokenizer dropped at end of input.
    truncated_tag: Option<String>,
}

impl HTMLParser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self {
            stack_of_open_elements: Vec::new(),
            tree: DomTree::new(),
            tokens,
            token_index: 0,
            issues: Vec::new(),
            truncated_tag: None,
        }
    }

    /// Record that the tokenizer dropped an unterminated tag with this
    /// markup; it becomes a parse issue at the end of the token stream.
    #[must_use]
    pub fn with_truncated_tag(mut self, markup: Option<String>) -> Self {
        self.truncated_tag = markup;
        self
    }

    /// Run the parser and return the tree rooted at `html`.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the parser and return both the tree and everything it tolerated.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        let token_count = tokens.len();
        for (index, token) in tokens.into_iter().enumerate() {
            self.token_index = index;
            match token {
                Token::Text(text) => self.add_text(text),
                Token::Tag(markup) => self.add_tag(&markup),
            }
        }
        self.token_index = token_count;
        if let Some(markup) = self.truncated_tag.take() {
            self.parse_issue(format!("dropped unterminated tag <{markup} at end of input"));
        }
        self.finish()
    }

    fn parse_issue(&mut self, message: String) {
        warn_once("HTML Parser", &message);
        self.issues.push(ParseIssue {
            message,
            token_index: self.token_index,
        });
    }

    fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    fn open_tags_are(&self, names: &[&str]) -> bool {
        self.stack_of_open_elements.len() == names.len()
            && self
                .stack_of_open_elements
                .iter()
                .zip(names)
                .all(|(&id, name)| self.tree.tag_name(id) == Some(*name))
    }

    fn has_open_element(&self, name: &str) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&id| self.tree.tag_name(id) == Some(name))
    }

    /// Whitespace-only runs between tags carry no content and are dropped.
    fn add_text(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }
        self.insert_implicit_tags(None);
        let Some(parent) = self.current_node() else {
            return;
        };
        let node = self.tree.alloc(NodeType::Text(text), Some(parent));
        self.tree.append_child(parent, node);
    }

    fn add_tag(&mut self, markup: &str) {
        let (tag, attributes) = parse_tag(markup);
        if tag.starts_with('!') {
            // DOCTYPE and comments.
            return;
        }
        if tag.is_empty() {
            self.parse_issue("ignored empty tag <>".to_string());
            return;
        }

        self.insert_implicit_tags(Some(&tag));

        if let Some(name) = tag.strip_prefix('/') {
            self.close_element(name);
        } else if VOID_ELEMENTS.contains(&tag.as_str()) {
            self.insert_void_element(tag, attributes);
        } else {
            self.open_element(tag, attributes);
        }
    }

    /// Which structural element is missing before a token with tag `incoming`
    /// (`None` for text) can be handled, if any.
    fn implicit_step(&self, incoming: Option<&str>) -> Option<ImplicitTag> {
        if self.stack_of_open_elements.is_empty() && incoming != Some("html") {
            Some(ImplicitTag::Html)
        } else if self.open_tags_are(&["html"])
            && !matches!(incoming, Some("head" | "body" | "/html"))
        {
            if incoming.is_some_and(is_head_element) {
                Some(ImplicitTag::Head)
            } else {
                Some(ImplicitTag::Body)
            }
        } else if self.open_tags_are(&["html", "head"])
            && incoming != Some("/head")
            && !incoming.is_some_and(is_head_element)
        {
            Some(ImplicitTag::CloseHead)
        } else {
            None
        }
    }

    /// Synthesize `html`, `head`, `body` and `</head>` until the stack is in
    /// a state where `incoming` can be handled.
    fn insert_implicit_tags(&mut self, incoming: Option<&str>) {
        while let Some(step) = self.implicit_step(incoming) {
            match step {
                ImplicitTag::CloseHead => self.close_element("head"),
                ImplicitTag::Html | ImplicitTag::Head | ImplicitTag::Body => {
                    self.open_element(step.to_string(), AttributesMap::new());
                }
            }
        }
    }

    fn open_element(&mut self, tag_name: String, attrs: AttributesMap) {
        let parent = self.current_node();
        let node = self
            .tree
            .alloc(NodeType::Element(ElementData { tag_name, attrs }), parent);
        self.stack_of_open_elements.push(node);
    }

    fn insert_void_element(&mut self, tag_name: String, attrs: AttributesMap) {
        let Some(parent) = self.current_node() else {
            return;
        };
        let node = self
            .tree
            .alloc(NodeType::Element(ElementData { tag_name, attrs }), Some(parent));
        self.tree.append_child(parent, node);
    }

    /// Pop the current element into its parent.
    ///
    /// The popped element does not have to be the one named: `</p>` inside
    /// an open `<b>` closes the `<b>`. A close tag naming nothing on the
    /// stack is stray and ignored, and the root is never popped.
    fn close_element(&mut self, name: &str) {
        if self.stack_of_open_elements.len() <= 1 {
            self.parse_issue(format!("ignored </{name}>: would close the root element"));
            return;
        }
        if !self.has_open_element(name) {
            self.parse_issue(format!("ignored stray close tag </{name}>"));
            return;
        }
        self.pop_into_parent();
    }

    fn pop_into_parent(&mut self) {
        if let Some(node) = self.stack_of_open_elements.pop()
            && let Some(parent) = self.current_node()
        {
            self.tree.append_child(parent, node);
        }
    }

    /// Close everything still open and hand back the tree.
    fn finish(mut self) -> (DomTree, Vec<ParseIssue>) {
        if self.stack_of_open_elements.is_empty() {
            self.insert_implicit_tags(None);
        }
        while self.stack_of_open_elements.len() > 1 {
            self.pop_into_parent();
        }
        debug_assert_eq!(self.current_node(), Some(NodeId::ROOT));
        (self.tree, self.issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse(html: &str) -> (DomTree, Vec<ParseIssue>) {
        HTMLParser::new(tokenize(html)).run_with_issues()
    }

    #[test]
    fn test_implicit_tag_names() {
        assert_eq!(ImplicitTag::Html.to_string(), "html");
        assert_eq!(ImplicitTag::Body.as_ref(), "body");
        assert_eq!(ImplicitTag::CloseHead.to_string(), "/head");
    }

    #[test]
    fn test_root_is_first_allocation() {
        let (tree, _) = parse("<p>x</p>");
        assert_eq!(tree.tag_name(NodeId::ROOT), Some("html"));
        assert_eq!(tree.parent(NodeId::ROOT), None);
    }

    #[test]
    fn test_root_close_records_issue() {
        let (_, issues) = parse("<html></html></html>");
        assert!(issues.iter().any(|i| i.message.contains("root")));
    }

    #[test]
    fn test_stray_close_records_issue_with_index() {
        let (_, issues) = parse("<p>a</p></b>");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].token_index, 3);
        assert!(issues[0].message.contains("</b>"));
    }

    #[test]
    fn test_truncated_tag_records_issue_at_end() {
        let tokens = tokenize("<p>hi<b");
        let token_count = tokens.len();
        let (tree, issues) = HTMLParser::new(tokens)
            .with_truncated_tag(Some("b".to_string()))
            .run_with_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].token_index, token_count);
        assert!(issues[0].message.contains("<b"));
        assert_eq!(tree.text_content(tree.root()), "hi");
    }

    #[test]
    fn test_empty_tag_is_ignored() {
        let (tree, issues) = parse("<>x");
        assert_eq!(tree.text_content(NodeId::ROOT), "x");
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_comments_and_doctype_are_discarded() {
        let (tree, issues) = parse("<!DOCTYPE html><!-- note -->x");
        assert!(issues.is_empty());
        assert_eq!(tree.len(), 3);
    }
}
