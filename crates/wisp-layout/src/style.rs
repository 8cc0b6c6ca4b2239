use crate::font::{FontKey, Slant, Weight};

/// The text style in effect at the current point of a layout pass.
///
/// Each styling tag touches exactly one property when it opens and applies
/// the inverse when it closes. `<small>` shrinks by 2 and `<big>` grows by 4,
/// so the two are not inverses of each other. Closing `</i>` or `</b>` sets
/// the property back to its plain value rather than to whatever an
/// enclosing tag had set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStyle {
    /// Current weight.
    pub weight: Weight,
    /// Current slant.
    pub slant: Slant,
    /// Current size.
    pub size: i32,
}

const SMALL_DELTA: i32 = 2;
const BIG_DELTA: i32 = 4;

impl LayoutStyle {
    /// Plain roman text at `size`.
    #[must_use]
    pub const fn new(size: i32) -> Self {
        Self {
            weight: Weight::Normal,
            slant: Slant::Roman,
            size,
        }
    }

    /// Key of the font this style selects.
    #[must_use]
    pub const fn font_key(&self) -> FontKey {
        FontKey::new(self.size, self.weight, self.slant)
    }

    /// Apply the effect of entering an element with this tag name.
    pub fn open_tag(&mut self, tag: &str) {
        match tag {
            "i" => self.slant = Slant::Italic,
            "b" => self.weight = Weight::Bold,
            "small" => self.size = self.size.saturating_sub(SMALL_DELTA),
            "big" => self.size = self.size.saturating_add(BIG_DELTA),
            _ => {}
        }
    }

    /// Apply the effect of leaving an element with this tag name.
    pub fn close_tag(&mut self, tag: &str) {
        match tag {
            "i" => self.slant = Slant::Roman,
            "b" => self.weight = Weight::Normal,
            "small" => self.size = self.size.saturating_add(SMALL_DELTA),
            "big" => self.size = self.size.saturating_sub(BIG_DELTA),
            _ => {}
        }
    }
}
