//! Text-flow layout for the Wisp renderer.
//!
//! # Scope
//!
//! This crate turns a parsed [`wisp_dom::DomTree`] into a [`DisplayList`] of
//! positioned words:
//! - **Style stack** - `<b>`, `<i>`, `<small>` and `<big>` toggle weight,
//!   slant and size for their subtree
//! - **Line breaking** - greedy, word at a time, never splitting a word
//! - **Baseline alignment** - words of different sizes on one line share a
//!   baseline
//! - **Font metrics** - an injected [`FontMetrics`] capability, usually a
//!   [`FontCache`] memoizing font handles by size, weight and slant
//! - **Viewport** - culling the display list to a scrolled window
//!
//! # Not Implemented
//!
//! - CSS of any kind
//! - Bidirectional text
//! - Incremental reflow

/// Positioned words and the scrolled window over them.
pub mod display_list;
/// Layout traversal and line building.
pub mod flow;
/// Font keys, metrics capability, and the font cache.
pub mod font;
/// Inherited text style.
pub mod style;

pub use display_list::{DisplayItem, DisplayList, PaintCommand, SCROLL_STEP, Viewport};
pub use flow::{LEADING, LayoutConfig, layout};
pub use font::{
    ApproximateFontLoader, FontCache, FontHandle, FontKey, FontLoader, FontMetrics, LineMetrics,
    Slant, Weight,
};
pub use style::LayoutStyle;
