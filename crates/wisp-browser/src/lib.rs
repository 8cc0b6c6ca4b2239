//! High-level API for the Wisp renderer.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Loading** - read, fetch, or decode HTML and parse it
//! - **Rendering** - tokenize, build, and lay out in one call
//! - **System Fonts** - fontdue-backed metrics for real text measurement
//!
//! # Not Yet Implemented
//!
//! - Resource loading (images, stylesheets, scripts)
//! - Painting pixels; callers receive a display list

pub mod font_metrics;

pub use wisp_common as common;
pub use wisp_dom as dom;
pub use wisp_html as html;
pub use wisp_layout as layout;

use std::fs;

use thiserror::Error;
use wisp_common::net::{DataUrl, FetchError, fetch_text};
use wisp_common::warning::clear_warnings;
use wisp_dom::DomTree;
use wisp_html::{HTMLParser, HTMLTokenizer, ParseIssue, Token};
use wisp_layout::{DisplayList, FontMetrics, LayoutConfig};

pub use font_metrics::{FontLoadError, FontdueFont, FontdueLoader};

/// A fully loaded and parsed document.
pub struct LoadedDocument {
    /// Original HTML source
    pub html_source: String,

    /// Source path or URL
    pub source_path: String,

    /// HTML tokens (for debugging)
    pub tokens: Vec<Token>,

    /// Parsed DOM tree
    pub dom: DomTree,

    /// Everything the parser tolerated
    pub parse_issues: Vec<ParseIssue>,
}

impl LoadedDocument {
    /// Lay this document out with `config` and `metrics`.
    #[must_use]
    pub fn render(&self, config: &LayoutConfig, metrics: &dyn FontMetrics) -> DisplayList {
        render(&self.dom, config, metrics)
    }
}

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read file
    #[error("failed to read '{path}': {source}")]
    File {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to fetch or decode a URL
    #[error("failed to load '{url}': {source}")]
    Network {
        /// URL that was requested.
        url: String,
        /// Underlying fetch error.
        source: FetchError,
    },
}

/// Load a document from a file path or URL.
///
/// `http://` and `https://` URLs are fetched, `data:` URLs are decoded in
/// place, and anything else is read from disk (a `file://` prefix is
/// stripped first). Warnings from any earlier load are cleared so each
/// document reports its own.
///
/// # Errors
///
/// Returns [`LoadError`] if the source cannot be read or fetched. Parsing
/// itself never fails.
pub fn load_document(path: &str) -> Result<LoadedDocument, LoadError> {
    clear_warnings();

    let html_source = if path.starts_with("http://") || path.starts_with("https://") {
        fetch_text(path).map_err(|source| LoadError::Network {
            url: path.to_string(),
            source,
        })?
    } else if path.starts_with("data:") {
        DataUrl::new(path.to_string())
            .decode_text()
            .map_err(|source| LoadError::Network {
                url: path.to_string(),
                source,
            })?
    } else {
        let file_path = path.strip_prefix("file://").unwrap_or(path);
        fs::read_to_string(file_path).map_err(|source| LoadError::File {
            path: file_path.to_string(),
            source,
        })?
    };

    let mut doc = parse_html_string(&html_source);
    doc.source_path = path.to_string();
    Ok(doc)
}

/// Parse an HTML string directly, without touching the filesystem.
#[must_use]
pub fn parse_html_string(html: &str) -> LoadedDocument {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    let truncated = tokenizer.truncated_tag().map(str::to_string);
    let tokens = tokenizer.into_tokens();
    let (dom, parse_issues) = HTMLParser::new(tokens.clone())
        .with_truncated_tag(truncated)
        .run_with_issues();

    LoadedDocument {
        html_source: html.to_string(),
        source_path: String::from("<string>"),
        tokens,
        dom,
        parse_issues,
    }
}

/// Lay out a parsed tree: the last stage of tokenize, parse, layout.
#[must_use]
pub fn render(tree: &DomTree, config: &LayoutConfig, metrics: &dyn FontMetrics) -> DisplayList {
    wisp_layout::layout(tree, config, metrics)
}
