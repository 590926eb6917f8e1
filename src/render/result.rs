//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered text
    pub content: String,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ExtractionStats) -> Self {
        Self {
            content,
            stats: Some(stats),
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: None,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of non-empty text runs emitted
    pub text_run_count: u32,

    /// Number of tables rendered
    pub table_count: u32,

    /// Number of table rows emitted (empty rows excluded)
    pub row_count: u32,

    /// Number of list items emitted
    pub list_item_count: u32,

    /// Number of `<br>` line breaks
    pub line_break_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment text run count.
    pub fn add_text_run(&mut self) {
        self.text_run_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment row count.
    pub fn add_row(&mut self) {
        self.row_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment line break count.
    pub fn add_line_break(&mut self) {
        self.line_break_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.text_run_count += other.text_run_count;
        self.table_count += other.table_count;
        self.row_count += other.row_count;
        self.list_item_count += other.list_item_count;
        self.line_break_count += other.line_break_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
