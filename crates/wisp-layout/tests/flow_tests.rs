//! Integration tests for text-flow layout.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use wisp_layout::{
    ApproximateFontLoader, DisplayItem, DisplayList, FontCache, FontKey, FontMetrics,
    LayoutConfig, LineMetrics, Slant, Viewport, Weight, layout,
};

/// Every character is 8px wide. Ascent equals the font size and descent is
/// a quarter of it, so mixed sizes produce distinct metrics.
struct FakeMetrics;

impl FontMetrics for FakeMetrics {
    fn measure(&self, text: &str, _font: FontKey) -> f32 {
        8.0 * text.chars().count() as f32
    }

    fn metrics(&self, font: FontKey) -> LineMetrics {
        let size = font.size as f32;
        LineMetrics {
            ascent: size,
            descent: size / 4.0,
            linespace: size * 1.25,
        }
    }
}

/// Fixed ascent 10 and descent 3 regardless of style.
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

/// Helper: parse and lay out at the default 800px width.
fn layout_html(html: &str, metrics: &dyn FontMetrics) -> DisplayList {
    layout_html_at(html, 800.0, metrics)
}

/// Helper: parse and lay out at a custom width.
fn layout_html_at(html: &str, width: f32, metrics: &dyn FontMetrics) -> DisplayList {
    let tree = wisp_html::parse(html);
    layout(&tree, &LayoutConfig::with_width(width), metrics)
}

fn find<'a>(list: &'a DisplayList, word: &str) -> &'a DisplayItem {
    list.iter()
        .find(|item| item.word == word)
        .unwrap_or_else(|| panic!("no item for {word:?}"))
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_end_to_end_single_line() {
    let list = layout_html("<b>Hi</b> there", &FlatMetrics);
    assert_eq!(list.len(), 2);

    let hi = &list.items()[0];
    let there = &list.items()[1];
    assert_eq!(hi.word, "Hi");
    assert_eq!(hi.weight, Weight::Bold);
    assert_eq!(there.word, "there");
    assert_eq!(there.weight, Weight::Normal);

    // Baseline at 18 + 1.25 * 10; each word's top is baseline - ascent.
    assert!(close(hi.y, 20.5));
    assert!(close(there.y, hi.y));
    assert!(close(hi.x, 13.0));
    // "Hi" (16) plus one space (8).
    assert!(close(there.x, 37.0));
    // Next line would start below 1.25 * descent.
    assert!(close(list.height(), 34.25));
}

#[test]
fn test_style_restored_after_close() {
    let list = layout_html("<b>x</b>y", &FlatMetrics);
    assert_eq!(find(&list, "x").weight, Weight::Bold);
    assert_eq!(find(&list, "y").weight, Weight::Normal);
}

#[test]
fn test_nested_styles_apply_to_subtree_only() {
    let list = layout_html("<i>a<big>b</big>c</i>d<small>e</small>f", &FlatMetrics);
    assert_eq!(find(&list, "a").slant, Slant::Italic);
    assert_eq!(find(&list, "b").size, 16);
    assert_eq!(find(&list, "c").size, 12);
    assert_eq!(find(&list, "c").slant, Slant::Italic);
    assert_eq!(find(&list, "d").slant, Slant::Roman);
    assert_eq!(find(&list, "e").size, 10);
    assert_eq!(find(&list, "f").size, 12);
}

#[test]
fn test_unclosed_style_reaches_end_of_document() {
    let list = layout_html("<b>one <i>two", &FlatMetrics);
    let two = find(&list, "two");
    assert_eq!(two.weight, Weight::Bold);
    assert_eq!(two.slant, Slant::Italic);
}

#[test]
fn test_mixed_sizes_share_baseline() {
    let list = layout_html("small <big><big>LARGE</big></big> <small>tiny</small>", &FakeMetrics);
    assert_eq!(list.len(), 3);

    let baselines: Vec<f32> = list
        .iter()
        .map(|item| item.y + FakeMetrics.metrics(item.font_key()).ascent)
        .collect();
    // Tallest ascent is the size-20 word.
    let expected = 18.0 + 1.25 * 20.0;
    for baseline in baselines {
        assert!(close(baseline, expected), "baseline {baseline} != {expected}");
    }
    assert!(find(&list, "LARGE").y < find(&list, "small").y);
}

#[test]
fn test_br_breaks_line() {
    let list = layout_html("a<br>b", &FlatMetrics);
    let a = find(&list, "a");
    let b = find(&list, "b");
    assert!(close(a.x, b.x));
    // One line advances 1.25 * (10 + 3).
    assert!(close(b.y - a.y, 16.25));
}

#[test]
fn test_empty_lines_take_no_space() {
    let plain = layout_html("x", &FlatMetrics);
    let broken = layout_html("<br><br><br>x", &FlatMetrics);
    assert!(close(find(&plain, "x").y, find(&broken, "x").y));
}

#[test]
fn test_paragraph_adds_vertical_step() {
    let list = layout_html("<p>a</p><p>b</p>", &FlatMetrics);
    let a = find(&list, "a");
    let b = find(&list, "b");
    assert!(close(b.y - a.y, 16.25 + 18.0));
}

#[test]
fn test_greedy_wrap() {
    // Usable right edge is 200 - 13 = 187. Each "word" plus space is 40.
    // x: 13, 53, 93, 133 fit (133 + 40 = 173); the fifth would end at 213.
    let list = layout_html_at("word word word word word word", 200.0, &FlatMetrics);
    let first_line_y = list.items()[0].y;
    let on_first: Vec<&DisplayItem> = list.iter().filter(|i| close(i.y, first_line_y)).collect();
    assert_eq!(on_first.len(), 4);
    assert!(close(list.items()[4].x, 13.0));
    assert!(list.items()[4].y > first_line_y);
}

#[test]
fn test_overwide_word_is_not_split() {
    let list = layout_html_at("a supercalifragilistic b", 100.0, &FlatMetrics);
    assert_eq!(list.len(), 3);
    let long = find(&list, "supercalifragilistic");
    assert!(close(long.x, 13.0));
    assert!(long.y > find(&list, "a").y);
    assert!(find(&list, "b").y > long.y);
}

#[test]
fn test_layout_is_repeatable() {
    let html = "<p>Some <b>bold</b> and <i>italic</i> words</p><p>again</p>";
    let cache = FontCache::new(ApproximateFontLoader);
    let first = layout_html_at(html, 120.0, &cache);
    let second = layout_html_at(html, 120.0, &cache);
    assert_eq!(first, second);

    let wide = layout_html_at(html, 800.0, &cache);
    assert!(wide.height() < first.height());
}

#[test]
fn test_font_cache_drives_layout() {
    let cache = FontCache::new(ApproximateFontLoader);
    let list = layout_html("plain <b>bold</b> <i>italic</i> <small>small</small>", &cache);
    assert_eq!(list.len(), 4);
    assert_eq!(cache.len(), 4);
}

#[test]
fn test_deeply_nested_small_does_not_fail() {
    let html = format!("{}x", "<small>".repeat(20));
    let cache = FontCache::new(ApproximateFontLoader);
    let list = layout_html(&html, &cache);
    assert_eq!(find(&list, "x").size, 12 - 40);
}

#[test]
fn test_deep_nesting_is_iterative() {
    let html = format!("{}deep", "<span>".repeat(100_000));
    let list = layout_html(&html, &FlatMetrics);
    assert_eq!(list.len(), 1);
}

#[test]
fn test_head_text_is_laid_out() {
    // No element is hidden; title text flows like any other.
    let list = layout_html("<title>T</title>body", &FlatMetrics);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_display_list_serializes() {
    let list = layout_html("<i>x</i>", &FlatMetrics);
    let json = serde_json::to_value(list.items()).unwrap();
    assert_eq!(json[0]["word"], "x");
    assert_eq!(json[0]["slant"], "italic");
    assert_eq!(json[0]["weight"], "normal");
    assert_eq!(json[0]["size"], 12);
}

#[test]
fn test_viewport_culls_and_shifts() {
    let html = (0..100).map(|i| format!("<p>line{i}</p>")).collect::<String>();
    let list = layout_html(&html, &FlatMetrics);
    let mut viewport = Viewport::new(200.0);
    let top = viewport.paint(&list, &FlatMetrics);
    assert!(!top.is_empty());
    assert!(top.len() < list.len());
    assert_eq!(top[0].item.word, "line0");

    viewport.scroll_down(&list);
    let scrolled = viewport.paint(&list, &FlatMetrics);
    for command in &scrolled {
        assert!(close(command.y, command.item.y - 100.0));
        assert!(command.y + 13.0 > 0.0 && command.y < 200.0);
    }
    assert_ne!(scrolled[0].item.word, "line0");
}

/// Whatever the word lengths and viewport width, the first line holds exactly
/// the longest prefix of words whose widths plus trailing spaces fit between
/// the margins (and always at least one word).
#[quickcheck]
fn prop_first_line_is_greedy(lengths: Vec<u8>, width: u16) -> TestResult {
    let lengths: Vec<usize> = lengths.iter().map(|&l| usize::from(l % 12) + 1).collect();
    if lengths.is_empty() {
        return TestResult::discard();
    }
    let width = f32::from(width % 1000) + 30.0;
    let words: Vec<String> = lengths.iter().map(|&l| "x".repeat(l)).collect();
    let list = layout_html_at(&words.join(" "), width, &FlatMetrics);

    let right_edge = width - 13.0;
    let mut cursor = 13.0;
    let mut expected = 0;
    for &len in &lengths {
        let advance = 8.0 * len as f32 + 8.0;
        if cursor + advance > right_edge && expected > 0 {
            break;
        }
        cursor += advance;
        expected += 1;
    }

    let first_y = list.items()[0].y;
    let on_first = list.iter().take_while(|i| close(i.y, first_y)).count();
    TestResult::from_bool(list.len() == lengths.len() && on_first == expected)
}
