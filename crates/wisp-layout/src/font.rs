//! Font metrics for text measurement during layout.
//!
//! Layout never touches font data directly. It asks a [`FontMetrics`]
//! capability for word widths and line metrics at a [`FontKey`]. The usual
//! implementation is a [`FontCache`], which builds one handle per key through
//! a [`FontLoader`] and keeps it for the life of the cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Stroke weight of a font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Slant of a font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Slant {
    /// Upright.
    #[default]
    Roman,
    /// Italic.
    Italic,
}

/// Everything that selects a font: size in points plus weight and slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FontKey {
    /// Font size. May drop to zero or below under deeply nested `<small>`.
    pub size: i32,
    /// Stroke weight.
    pub weight: Weight,
    /// Slant.
    pub slant: Slant,
}

impl FontKey {
    /// Create a key.
    #[must_use]
    pub const fn new(size: i32, weight: Weight, slant: Slant) -> Self {
        Self {
            size,
            weight,
            slant,
        }
    }
}

/// Vertical metrics of a font, all in pixels and all non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Height above the baseline.
    pub ascent: f32,
    /// Depth below the baseline.
    pub descent: f32,
    /// Recommended distance between consecutive baselines.
    pub linespace: f32,
}

/// Measurement capability used by layout.
///
/// Implementations must be deterministic for a given key; layout output is
/// only as reproducible as the metrics behind it.
pub trait FontMetrics {
    /// Advance width of `text` in pixels.
    fn measure(&self, text: &str, font: FontKey) -> f32;

    /// Vertical metrics of the font.
    fn metrics(&self, font: FontKey) -> LineMetrics;
}

/// A constructed font at one size, weight and slant.
pub trait FontHandle {
    /// Advance width of `text` in pixels.
    fn measure(&self, text: &str) -> f32;

    /// Vertical metrics of this font.
    fn metrics(&self) -> LineMetrics;
}

/// Builds font handles for the cache.
pub trait FontLoader {
    /// The handle type this loader produces.
    type Handle: FontHandle;

    /// Construct the font for `key`. Called at most once per key per cache.
    fn load(&self, key: FontKey) -> Self::Handle;
}

/// Memoizes font handles by [`FontKey`].
///
/// Entries are never evicted; a document only uses a handful of size,
/// weight and slant combinations. The map sits behind a mutex so a cache
/// shared between threads never builds the same handle twice.
pub struct FontCache<L: FontLoader> {
    loader: L,
    fonts: Mutex<HashMap<FontKey, L::Handle>>,
}

impl<L: FontLoader> FontCache<L> {
    /// Create an empty cache over `loader`.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            fonts: Mutex::new(HashMap::new()),
        }
    }

    /// Number of handles built so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts().len()
    }

    /// Returns true if no handle has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts().is_empty()
    }

    /// The loader behind this cache.
    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    fn fonts(&self) -> MutexGuard<'_, HashMap<FontKey, L::Handle>> {
        self.fonts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_font<T>(&self, key: FontKey, f: impl FnOnce(&L::Handle) -> T) -> T {
        let mut fonts = self.fonts();
        let font = fonts.entry(key).or_insert_with(|| self.loader.load(key));
        f(font)
    }
}

impl<L: FontLoader> FontMetrics for FontCache<L> {
    fn measure(&self, text: &str, font: FontKey) -> f32 {
        self.with_font(font, |handle| handle.measure(text))
    }

    fn metrics(&self, font: FontKey) -> LineMetrics {
        self.with_font(font, L::Handle::metrics)
    }
}

/// Fixed-ratio metrics for when no font data is available.
///
/// Average Latin advance is taken as 0.6× the size, ascent 0.8×, descent
/// 0.2× and line spacing 1.2×. Bold text is 10% wider. Sizes below one are
/// measured as one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontLoader;

/// Handle produced by [`ApproximateFontLoader`].
#[derive(Debug, Clone, Copy)]
pub struct ApproximateFont {
    advance: f32,
    size: f32,
}

impl FontLoader for ApproximateFontLoader {
    type Handle = ApproximateFont;

    fn load(&self, key: FontKey) -> ApproximateFont {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        const BOLD_WIDTH_RATIO: f32 = 1.1;

        let size = key.size.max(1) as f32;
        let advance = match key.weight {
            Weight::Normal => size * CHAR_WIDTH_RATIO,
            Weight::Bold => size * CHAR_WIDTH_RATIO * BOLD_WIDTH_RATIO,
        };
        ApproximateFont { advance, size }
    }
}

impl FontHandle for ApproximateFont {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn metrics(&self) -> LineMetrics {
        LineMetrics {
            ascent: self.size * 0.8,
            descent: self.size * 0.2,
            linespace: self.size * 1.2,
        }
    }
}
