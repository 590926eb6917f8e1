//! # cfptext
//!
//! Text extraction from conference web pages.
//!
//! This library turns an HTML document into normalized, structure-preserving
//! plain text (tables become `|`-delimited lines, list items become single
//! delimited lines), and reassembles the flat key/value answer of an
//! extraction service into grouped `{name, date}` records.
//!
//! ## Quick Start
//!
//! ```
//! use cfptext::{assemble_records, extract_text};
//!
//! fn main() -> cfptext::Result<()> {
//!     let text = extract_text(
//!         "<body><ul><li><b>Deadline</b><span>Jan 1</span></li></ul></body>",
//!     )?;
//!     assert!(text.contains("Deadline | Jan 1"));
//!
//!     let groups = assemble_records([("startName", "Papers"), ("start", "Jan 1")]);
//!     assert_eq!(groups.get("start").unwrap()[0].date, "Jan 1");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structure-aware rendering**: tables, list items, block and inline elements
//! - **Text normalization**: repairs line-wrapping artifacts inside text runs
//! - **Record assembly**: pairs names and dates from an ordered key/value stream
//! - **Parallel processing**: uses Rayon for batches of documents
//! - **Extraction sessions** (`async` feature): bounded-wait requests to an extraction service

pub mod error;
pub mod model;
pub mod parser;
pub mod records;
pub mod render;

#[cfg(feature = "async")]
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{DateGroup, DateGroups, Element, Node, Record};
pub use parser::{ErrorMode, HtmlParser, ParseOptions};
pub use records::{assemble_records, parse_pairs, records_from_json, RecordAssembler};
pub use render::{
    CleanupOptions, CleanupPreset, ExtractionStats, JsonFormat, ListMode, RenderOptions,
    RenderResult,
};

#[cfg(feature = "async")]
pub use session::{ExtractionChannel, ExtractionSession, SessionConfig, TcpChannel};

use std::path::Path;

use rayon::prelude::*;

/// Parse an HTML document into its sanitized document tree.
///
/// # Example
///
/// ```
/// let tree = cfptext::parse_html("<body><script>x()</script><p>Hi</p></body>").unwrap();
/// assert_eq!(tree.tag, "body");
/// assert!(!tree.has_descendant("script"));
/// ```
pub fn parse_html(html: &str) -> Result<Element> {
    HtmlParser::default().parse(html)
}

/// Render an HTML document to plain text with default options.
///
/// # Example
///
/// ```
/// use cfptext::extract_text;
///
/// let text = extract_text("<body><p>Call for\npapers</p></body>").unwrap();
/// assert_eq!(text.trim(), "Call for papers");
/// ```
pub fn extract_text(html: &str) -> Result<String> {
    Extractor::new().extract(html).map(|result| result.content)
}

/// Render an HTML document to plain text with custom options.
pub fn extract_text_with_options(
    html: &str,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> Result<String> {
    let parser = HtmlParser::new(parse_options.clone())?;
    let root = parser.parse(html)?;
    render::to_text(&root, render_options)
}

/// Render an HTML document, yielding an empty string when extraction fails.
///
/// The failure is logged, not returned.
pub fn extract_text_or_empty(html: &str) -> String {
    Extractor::new().extract_or_empty(html)
}

/// Render an HTML file to plain text.
///
/// # Example
///
/// ```no_run
/// let text = cfptext::extract_file("cfp.html").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let data = std::fs::read(path)?;
    let root = HtmlParser::default().parse_bytes(&data)?;
    render::to_text(&root, &RenderOptions::default())
}

/// Render many HTML documents in parallel.
///
/// Each document gets its own tree and accumulator; results come back in
/// input order.
pub fn extract_batch<S>(
    documents: &[S],
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> Vec<Result<String>>
where
    S: AsRef<str> + Sync,
{
    documents
        .par_iter()
        .map(|html| extract_text_with_options(html.as_ref(), parse_options, render_options))
        .collect()
}

/// Builder for configuring and running text extraction.
///
/// # Example
///
/// ```
/// use cfptext::{CleanupPreset, Extractor};
///
/// let result = Extractor::new()
///     .with_root("#cfp")
///     .with_cleanup(CleanupPreset::Standard)
///     .with_stats()
///     .extract(r#"<body><nav>Home</nav><div id="cfp"><p>Deadline</p></div></body>"#)?;
/// assert_eq!(result.content, "Deadline");
/// assert!(result.stats.is_some());
/// # Ok::<(), cfptext::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Extractor {
    /// Create a new extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fall back to the whole document when the root selector matches nothing.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the root selector.
    pub fn with_root(mut self, selector: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_root(selector);
        self
    }

    /// Strip an additional tag before rendering.
    pub fn also_strip(mut self, tag: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.also_strip(tag);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Render lists with item markers.
    pub fn marked_lists(mut self) -> Self {
        self.render_options = self.render_options.marked_lists();
        self
    }

    /// Limit nesting depth for both parsing and rendering.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.parse_options = self.parse_options.with_max_depth(depth);
        self.render_options = self.render_options.with_max_depth(depth);
        self
    }

    /// Collect extraction statistics.
    pub fn with_stats(mut self) -> Self {
        self.render_options = self.render_options.with_stats(true);
        self
    }

    /// Get the parse options.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Get the render options.
    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Parse and render an HTML document.
    pub fn extract(&self, html: &str) -> Result<RenderResult> {
        let parser = HtmlParser::new(self.parse_options.clone())?;
        let root = parser.parse(html)?;
        render::to_text_with_stats(&root, &self.render_options)
    }

    /// Parse and render an HTML document, yielding an empty string on failure.
    pub fn extract_or_empty(&self, html: &str) -> String {
        match self.extract(html) {
            Ok(result) => result.content,
            Err(e) => {
                log::warn!("Text extraction failed, using empty text: {}", e);
                String::new()
            }
        }
    }

    /// Parse and render an HTML file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<RenderResult> {
        let data = std::fs::read(path)?;
        let html = String::from_utf8(data)?;
        self.extract(&html)
    }
}
