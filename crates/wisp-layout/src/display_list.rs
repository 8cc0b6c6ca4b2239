//! Display list: the output of layout.
//!
//! A [`DisplayList`] holds one [`DisplayItem`] per word, in layout order, in
//! page coordinates. A painter shows a window of it through a [`Viewport`],
//! which culls items outside the window and shifts the rest by the scroll
//! offset.

use serde::Serialize;

use crate::font::{FontKey, FontMetrics, Slant, Weight};

/// How far one scroll step moves the viewport, in pixels.
pub const SCROLL_STEP: f32 = 100.0;

/// A word at its computed position with the style it was measured in.
///
/// `y` is the top of the word's ascent, not its baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    /// Left edge in page coordinates.
    pub x: f32,
    /// Top edge in page coordinates.
    pub y: f32,
    /// The word itself.
    pub word: String,
    /// Font size.
    pub size: i32,
    /// Font weight.
    pub weight: Weight,
    /// Font slant.
    pub slant: Slant,
}

impl DisplayItem {
    /// Key of the font the word was measured in.
    #[must_use]
    pub const fn font_key(&self) -> FontKey {
        FontKey::new(self.size, self.weight, self.slant)
    }
}

/// Every word of a page, in layout order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    items: Vec<DisplayItem>,
    /// Vertical position of the layout cursor after the last line.
    height: f32,
}

impl DisplayList {
    /// Wrap laid-out items. `height` is the page's content height.
    #[must_use]
    pub const fn new(items: Vec<DisplayItem>, height: f32) -> Self {
        Self { items, height }
    }

    /// All items in layout order.
    #[must_use]
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing was laid out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in layout order.
    pub fn iter(&self) -> std::slice::Iter<'_, DisplayItem> {
        self.items.iter()
    }

    /// Content height: where the next line would have started.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DisplayItem;
    type IntoIter = std::slice::Iter<'a, DisplayItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A surviving item positioned relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintCommand<'a> {
    /// Left edge in viewport coordinates.
    pub x: f32,
    /// Top edge in viewport coordinates (`item.y - scroll`).
    pub y: f32,
    /// The item being painted.
    pub item: &'a DisplayItem,
}

/// A vertical window of `height` pixels starting `scroll` pixels down the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Distance from the top of the page to the top of the window.
    pub scroll: f32,
    /// Window height.
    pub height: f32,
}

impl Viewport {
    /// A window at the top of the page.
    #[must_use]
    pub const fn new(height: f32) -> Self {
        Self {
            scroll: 0.0,
            height,
        }
    }

    /// Whether an item spanning `[item.y, item.y + linespace)` overlaps the
    /// window `[scroll, scroll + height)`.
    #[must_use]
    pub fn is_visible(&self, item: &DisplayItem, linespace: f32) -> bool {
        item.y < self.scroll + self.height && item.y + linespace > self.scroll
    }

    /// Cull `list` to the window and shift the survivors by the scroll
    /// offset, preserving layout order.
    #[must_use]
    pub fn paint<'a>(
        &self,
        list: &'a DisplayList,
        metrics: &dyn FontMetrics,
    ) -> Vec<PaintCommand<'a>> {
        list.iter()
            .filter(|item| self.is_visible(item, metrics.metrics(item.font_key()).linespace))
            .map(|item| PaintCommand {
                x: item.x,
                y: item.y - self.scroll,
                item,
            })
            .collect()
    }

    /// Largest scroll offset that still shows content.
    #[must_use]
    pub fn max_scroll(&self, list: &DisplayList) -> f32 {
        (list.height() - self.height).max(0.0)
    }

    /// Move one step down, stopping at the end of the content.
    pub fn scroll_down(&mut self, list: &DisplayList) {
        self.scroll = (self.scroll + SCROLL_STEP).min(self.max_scroll(list));
    }

    /// Move one step up, stopping at the top of the page.
    pub fn scroll_up(&mut self) {
        self.scroll = (self.scroll - SCROLL_STEP).max(0.0);
    }
}
