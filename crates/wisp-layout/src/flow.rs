//! Text flow: placing every word of a document on lines.
//!
//! Layout walks the tree in document order, keeping a [`LayoutStyle`] that
//! elements change on entry and restore on exit. Words are queued on the
//! current line until the next one would overflow the viewport; the line is
//! then flushed, which fixes the vertical position of everything on it.

use wisp_common::warning::warn_once;
use wisp_dom::{DomTree, NodeId, NodeType};

use crate::display_list::{DisplayItem, DisplayList};
use crate::font::{FontKey, FontMetrics};
use crate::style::LayoutStyle;

/// Extra room given above the tallest ascent and below the deepest descent
/// of each line.
pub const LEADING: f32 = 1.25;

/// Page geometry for a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Viewport width in pixels.
    pub width: f32,
    /// Left and right margin; lines start at `x = hstep`.
    pub hstep: f32,
    /// Top margin, and the extra gap after each paragraph.
    pub vstep: f32,
    /// Font size of unstyled text.
    pub base_size: i32,
}

impl LayoutConfig {
    /// Default geometry at a different viewport width.
    #[must_use]
    pub fn with_width(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            hstep: 13.0,
            vstep: 18.0,
            base_size: 12,
        }
    }
}

/// Lay out `tree` for a viewport `config.width` pixels wide.
///
/// The result depends only on the tree, the config and the metrics; running
/// it again after a resize produces a fresh list that replaces the old one.
#[must_use]
pub fn layout(tree: &DomTree, config: &LayoutConfig, metrics: &dyn FontMetrics) -> DisplayList {
    let mut flow = TextFlow::new(config, metrics);
    flow.walk(tree, tree.root());
    flow.flush();
    DisplayList::new(flow.display_list, flow.cursor_y)
}

/// A word waiting on the current line for its vertical position.
struct LineEntry {
    x: f32,
    word: String,
    font: FontKey,
}

enum Visit {
    Enter(NodeId),
    Leave(NodeId),
}

struct TextFlow<'a> {
    config: &'a LayoutConfig,
    metrics: &'a dyn FontMetrics,
    style: LayoutStyle,
    cursor_x: f32,
    cursor_y: f32,
    line: Vec<LineEntry>,
    display_list: Vec<DisplayItem>,
}

impl<'a> TextFlow<'a> {
    fn new(config: &'a LayoutConfig, metrics: &'a dyn FontMetrics) -> Self {
        Self {
            config,
            metrics,
            style: LayoutStyle::new(config.base_size),
            cursor_x: config.hstep,
            cursor_y: config.vstep,
            line: Vec::new(),
            display_list: Vec::new(),
        }
    }

    /// Depth-first traversal with an explicit stack, so document nesting
    /// depth never turns into call-stack depth.
    fn walk(&mut self, tree: &DomTree, root: NodeId) {
        let mut stack = vec![Visit::Enter(root)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    let Some(node) = tree.get(id) else { continue };
                    match &node.node_type {
                        NodeType::Text(text) => {
                            for word in text.split_whitespace() {
                                self.word(word);
                            }
                        }
                        NodeType::Element(data) => {
                            self.open_tag(&data.tag_name);
                            stack.push(Visit::Leave(id));
                            stack.extend(node.children.iter().rev().map(|&c| Visit::Enter(c)));
                        }
                    }
                }
                Visit::Leave(id) => {
                    if let Some(tag) = tree.tag_name(id) {
                        self.close_tag(tag);
                    }
                }
            }
        }
    }

    fn open_tag(&mut self, tag: &str) {
        self.style.open_tag(tag);
        if tag == "br" {
            self.flush();
        }
    }

    fn close_tag(&mut self, tag: &str) {
        self.style.close_tag(tag);
        if tag == "p" {
            self.flush();
            self.cursor_y += self.config.vstep;
        }
    }

    fn word(&mut self, word: &str) {
        let font = self.style.font_key();
        let width = self.metrics.measure(word, font);
        let space = self.metrics.measure(" ", font);

        let right_edge = self.config.width - self.config.hstep;
        if self.cursor_x + width + space > right_edge {
            if self.line.is_empty() {
                warn_once("Layout", "word wider than the viewport placed on its own line");
            }
            self.flush();
        }

        self.line.push(LineEntry {
            x: self.cursor_x,
            word: word.to_string(),
            font,
        });
        self.cursor_x += width + space;
    }

    /// Emit the queued line, aligning every word on a shared baseline.
    fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }

        let line = std::mem::take(&mut self.line);
        let metrics: Vec<_> = line.iter().map(|e| self.metrics.metrics(e.font)).collect();
        let max_ascent = metrics.iter().map(|m| m.ascent).fold(0.0, f32::max);
        let max_descent = metrics.iter().map(|m| m.descent).fold(0.0, f32::max);
        let baseline = self.cursor_y + LEADING * max_ascent;

        for (entry, m) in line.into_iter().zip(&metrics) {
            self.display_list.push(DisplayItem {
                x: entry.x,
                y: baseline - m.ascent,
                word: entry.word,
                size: entry.font.size,
                weight: entry.font.weight,
                slant: entry.font.slant,
            });
        }

        self.cursor_y = baseline + LEADING * max_descent;
        self.cursor_x = self.config.hstep;
    }
}
