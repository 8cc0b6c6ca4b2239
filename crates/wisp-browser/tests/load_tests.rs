//! Integration tests for document loading and rendering.

use std::path::PathBuf;

use wisp_browser::{LoadError, load_document, parse_html_string, render};
use wisp_layout::{FontKey, FontMetrics, LayoutConfig, LineMetrics, Weight};

struct FlatMetrics;

impl FontMetrics for FlatMetrics {
    fn measure(&self, text: &str, _font: FontKey) -> f32 {
        8.0 * text.chars().count() as f32
    }

    fn metrics(&self, _font: FontKey) -> LineMetrics {
        LineMetrics {
            ascent: 10.0,
            descent: 3.0,
            linespace: 13.0,
        }
    }
}

/// A fresh file under the system temp dir; removed when dropped.
struct TempHtml(PathBuf);

impl TempHtml {
    fn new(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!("wisp-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        Self(path)
    }
}

impl Drop for TempHtml {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn test_parse_html_string_keeps_every_stage() {
    let doc = parse_html_string("<b>Hi</b> there");
    assert_eq!(doc.html_source, "<b>Hi</b> there");
    assert_eq!(doc.source_path, "<string>");
    assert_eq!(doc.tokens.len(), 4);
    assert_eq!(doc.dom.tag_name(doc.dom.root()), Some("html"));
    assert!(doc.parse_issues.is_empty());
}

#[test]
fn test_render_end_to_end() {
    let doc = parse_html_string("<b>Hi</b> there");
    let list = doc.render(&LayoutConfig::default(), &FlatMetrics);
    assert_eq!(list.len(), 2);
    assert_eq!(list.items()[0].word, "Hi");
    assert_eq!(list.items()[0].weight, Weight::Bold);
    assert_eq!(list.items()[1].weight, Weight::Normal);
    assert!((list.items()[0].y - list.items()[1].y).abs() < f32::EPSILON);

    let same = render(&doc.dom, &LayoutConfig::default(), &FlatMetrics);
    assert_eq!(list, same);
}

#[test]
fn test_stray_close_tag_is_reported() {
    let doc = parse_html_string("</b>hi");
    assert_eq!(doc.parse_issues.len(), 1);
    let list = doc.render(&LayoutConfig::default(), &FlatMetrics);
    assert_eq!(list.len(), 1);
    assert_eq!(list.items()[0].word, "hi");
}

#[test]
fn test_unterminated_tag_is_reported() {
    let doc = parse_html_string("<p>hi<b");
    assert_eq!(doc.parse_issues.len(), 1);
    assert_eq!(doc.parse_issues[0].token_index, doc.tokens.len());
    assert!(doc.parse_issues[0].message.contains("unterminated"));
    assert_eq!(doc.dom.text_content(doc.dom.root()), "hi");
}

#[test]
fn test_load_plain_data_url() {
    let doc = load_document("data:text/html,<i>x</i>").unwrap();
    assert_eq!(doc.html_source, "<i>x</i>");
    assert_eq!(doc.source_path, "data:text/html,<i>x</i>");
}

#[test]
fn test_load_base64_data_url() {
    let doc = load_document("data:text/html;base64,PGk+eDwvaT4=").unwrap();
    assert_eq!(doc.html_source, "<i>x</i>");
}

#[test]
fn test_malformed_data_url_is_an_error() {
    let err = load_document("data:text/html").err().unwrap();
    assert!(matches!(err, LoadError::Network { .. }));
}

#[test]
fn test_load_from_file() {
    let file = TempHtml::new("page.html", "<p>one</p><p>two</p>");
    let doc = load_document(file.0.to_str().unwrap()).unwrap();
    assert_eq!(doc.html_source, "<p>one</p><p>two</p>");
    let list = doc.render(&LayoutConfig::default(), &FlatMetrics);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_load_from_file_url() {
    let file = TempHtml::new("url.html", "hello");
    let url = format!("file://{}", file.0.display());
    let doc = load_document(&url).unwrap();
    assert_eq!(doc.html_source, "hello");
}

#[test]
fn test_missing_file_is_an_error() {
    let err = load_document("/definitely/not/here.html").err().unwrap();
    assert!(matches!(err, LoadError::File { .. }));
    assert!(err.to_string().contains("/definitely/not/here.html"));
}
