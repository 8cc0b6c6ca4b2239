//! Font loading backed by fontdue for accurate text measurement during layout.
//!
//! [`FontdueLoader`] finds regular, bold, italic and bold-italic system fonts
//! once; the layout [`FontCache`](wisp_layout::FontCache) then asks it for one
//! [`FontdueFont`] per size, weight and slant.

use std::path::Path;
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use thiserror::Error;
use wisp_common::warning::warn_once;
use wisp_layout::{FontHandle, FontKey, FontLoader, LineMetrics, Slant, Weight};

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// Errors from locating or parsing font files.
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// None of the regular font search paths held a usable font.
    #[error("no system font found (searched {} paths)", FONT_SEARCH_PATHS.len())]
    NoSystemFont,
    /// The font file could not be read.
    #[error("failed to read font '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// fontdue rejected the font data.
    #[error("failed to parse font: {0}")]
    Parse(&'static str),
}

/// Builds [`FontdueFont`] handles from up to four font faces.
///
/// Missing variants fall back to the closest available face: bold-italic
/// tries bold, then italic, then regular.
pub struct FontdueLoader {
    regular: Arc<Font>,
    bold: Option<Arc<Font>>,
    italic: Option<Arc<Font>>,
    bold_italic: Option<Arc<Font>>,
}

impl FontdueLoader {
    /// Load the regular face and whichever variants exist on this system.
    ///
    /// # Errors
    ///
    /// Returns [`FontLoadError::NoSystemFont`] if no regular face is found.
    pub fn from_system() -> Result<Self, FontLoadError> {
        let regular =
            load_font_from_paths(FONT_SEARCH_PATHS).ok_or(FontLoadError::NoSystemFont)?;
        Ok(Self {
            regular: Arc::new(regular),
            bold: load_font_from_paths(FONT_BOLD_SEARCH_PATHS).map(Arc::new),
            italic: load_font_from_paths(FONT_ITALIC_SEARCH_PATHS).map(Arc::new),
            bold_italic: load_font_from_paths(FONT_BOLD_ITALIC_SEARCH_PATHS).map(Arc::new),
        })
    }

    /// Use one font file for every weight and slant.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    /// Use one in-memory font for every weight and slant.
    ///
    /// # Errors
    ///
    /// Returns [`FontLoadError::Parse`] if fontdue cannot parse `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FontLoadError> {
        let font = Font::from_bytes(data, FontSettings::default()).map_err(FontLoadError::Parse)?;
        Ok(Self {
            regular: Arc::new(font),
            bold: None,
            italic: None,
            bold_italic: None,
        })
    }

    fn face(&self, weight: Weight, slant: Slant) -> &Arc<Font> {
        let faces = Faces {
            regular: &self.regular,
            bold: self.bold.as_ref(),
            italic: self.italic.as_ref(),
            bold_italic: self.bold_italic.as_ref(),
        };
        faces.select(weight, slant)
    }
}

/// Borrowed view of the loaded faces, so fallback order does not depend on
/// having real font data.
struct Faces<'a, T> {
    regular: &'a T,
    bold: Option<&'a T>,
    italic: Option<&'a T>,
    bold_italic: Option<&'a T>,
}

impl<'a, T> Faces<'a, T> {
    fn select(&self, weight: Weight, slant: Slant) -> &'a T {
        let preferred = match (weight, slant) {
            (Weight::Normal, Slant::Roman) => None,
            (Weight::Bold, Slant::Roman) => self.bold,
            (Weight::Normal, Slant::Italic) => self.italic,
            (Weight::Bold, Slant::Italic) => self.bold_italic.or(self.bold).or(self.italic),
        };
        preferred.unwrap_or(self.regular)
    }
}

impl FontLoader for FontdueLoader {
    type Handle = FontdueFont;

    fn load(&self, key: FontKey) -> FontdueFont {
        FontdueFont {
            font: Arc::clone(self.face(key.weight, key.slant)),
            px: key.size.max(1) as f32,
        }
    }
}

/// One face at one pixel size.
pub struct FontdueFont {
    font: Arc<Font>,
    px: f32,
}

impl FontHandle for FontdueFont {
    fn measure(&self, text: &str) -> f32 {
        // Font::metrics() rather than rasterize(): only advances are needed.
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, self.px).advance_width)
            .sum()
    }

    fn metrics(&self) -> LineMetrics {
        if let Some(line) = self.font.horizontal_line_metrics(self.px) {
            LineMetrics {
                ascent: line.ascent,
                // fontdue reports descent as a negative offset.
                descent: -line.descent,
                linespace: line.new_line_size,
            }
        } else {
            warn_once("Fonts", "font has no horizontal line metrics; using size ratios");
            LineMetrics {
                ascent: self.px * 0.8,
                descent: self.px * 0.2,
                linespace: self.px * 1.2,
            }
        }
    }
}

/// Try to load a font from a list of filesystem paths.
fn load_font_from_paths(paths: &[&str]) -> Option<Font> {
    paths.iter().find_map(|path| {
        let data = std::fs::read(path).ok()?;
        Font::from_bytes(data, FontSettings::default()).ok()
    })
}
