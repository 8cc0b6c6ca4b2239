//! Wisp CLI
//!
//! Loads a page and prints the stages of the pipeline: tokens, the parsed
//! tree, and the words that land in the viewport.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use wisp_browser::{FontdueLoader, LoadedDocument, load_document, parse_html_string};
use wisp_html::print_tree;
use wisp_layout::{
    ApproximateFontLoader, DisplayList, FontCache, FontMetrics, LayoutConfig, Viewport,
};

/// Wisp: tag-soup HTML parser and text-flow layout
#[derive(Parser, Debug)]
#[command(name = "wisp")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a local file
    wisp ./index.html

    # Fetch a page and show its tree
    wisp --tree https://example.com

    # Parse inline HTML and dump the display list as JSON
    wisp --json --html '<b>Hi</b> there'

    # Show the second screenful of a narrow layout
    wisp --width 400 --scroll 600 page.html

    # Measure with a specific font file
    wisp --font ./DejaVuSans.ttf page.html
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to HTML file, `data:` URL, or http(s) URL
    #[arg(value_name = "FILE|URL")]
    path: Option<String>,

    /// Parse HTML string directly instead of file/URL
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the parsed tree
    #[arg(long)]
    tree: bool,

    /// Print the full display list as JSON instead of the visible words
    #[arg(long)]
    json: bool,

    /// Viewport width in pixels
    #[arg(long, default_value = "800")]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value = "600")]
    height: f32,

    /// Scroll offset from the top of the page in pixels
    #[arg(long, default_value = "0")]
    scroll: f32,

    /// Use fixed-ratio font metrics instead of system fonts
    #[arg(long)]
    approximate: bool,

    /// Measure with this font file for every weight and slant
    #[arg(long, value_name = "FILE", conflicts_with = "approximate")]
    font: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let doc = load_doc(&cli)?;

    if cli.approximate {
        return print_document(&cli, &doc, &FontCache::new(ApproximateFontLoader));
    }

    if let Some(ref font) = cli.font {
        let loader = FontdueLoader::from_path(font)
            .with_context(|| format!("could not load font {}", font.display()))?;
        return print_document(&cli, &doc, &FontCache::new(loader));
    }

    match FontdueLoader::from_system() {
        Ok(loader) => print_document(&cli, &doc, &FontCache::new(loader)),
        Err(e) => {
            eprintln!("{} {e}; using approximate metrics", "[Wisp]".yellow());
            print_document(&cli, &doc, &FontCache::new(ApproximateFontLoader))
        }
    }
}

/// Load document from CLI arguments
fn load_doc(cli: &Cli) -> Result<LoadedDocument> {
    if let Some(ref html_string) = cli.html {
        Ok(parse_html_string(html_string))
    } else if let Some(ref path) = cli.path {
        load_document(path).with_context(|| format!("could not load {path}"))
    } else {
        bail!("expected a file path, URL, or --html")
    }
}

fn print_document(cli: &Cli, doc: &LoadedDocument, metrics: &dyn FontMetrics) -> Result<()> {
    let config = LayoutConfig::with_width(cli.width);
    let list = doc.render(&config, metrics);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if cli.tokens {
        header("Tokens");
        for token in &doc.tokens {
            println!("{token}");
        }
        println!();
    }

    if cli.tree {
        header("DOM Tree");
        print_tree(&doc.dom, doc.dom.root());
        println!();
    }

    if !doc.parse_issues.is_empty() {
        header("Parse Issues");
        for issue in &doc.parse_issues {
            println!("  - token {}: {}", issue.token_index, issue.message);
        }
        println!();
    }

    print_viewport(cli, &list, metrics);
    Ok(())
}

fn print_viewport(cli: &Cli, list: &DisplayList, metrics: &dyn FontMetrics) {
    let mut viewport = Viewport::new(cli.height);
    viewport.scroll = cli.scroll.clamp(0.0, viewport.max_scroll(list));

    header(&format!(
        "Display List ({}x{} at scroll {})",
        cli.width, cli.height, viewport.scroll
    ));
    let commands = viewport.paint(list, metrics);
    for command in &commands {
        let item = command.item;
        println!(
            "{:>8.1} {:>8.1}  {:<24} {} {} {}",
            command.x, command.y, item.word, item.size, item.weight, item.slant
        );
    }
    println!(
        "\n{} of {} words visible, page height {:.1}",
        commands.len(),
        list.len(),
        list.height()
    );
}

fn header(title: &str) {
    println!("{}", format!("=== {title} ===").bold());
}
