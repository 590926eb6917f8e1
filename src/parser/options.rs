//! Parsing options and configuration.

/// Tags removed from every document before rendering.
pub const DEFAULT_STRIP_TAGS: &[&str] = &["script", "style"];

/// Options for parsing HTML documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// CSS selector of the element to render (first match wins)
    pub root_selector: String,

    /// Non-content tags removed by the sanitizer
    pub strip_tags: Vec<String>,

    /// Maximum element nesting accepted when building the tree (None = unlimited)
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (fall back to the whole document).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the root selector.
    pub fn with_root(mut self, selector: impl Into<String>) -> Self {
        self.root_selector = selector.into();
        self
    }

    /// Replace the list of stripped tags.
    pub fn with_strip_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_tags = tags
            .into_iter()
            .map(|t| t.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Strip one more tag in addition to the current list.
    pub fn also_strip(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        if !self.strip_tags.contains(&tag) {
            self.strip_tags.push(tag);
        }
        self
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            root_selector: "body".to_string(),
            strip_tags: DEFAULT_STRIP_TAGS.iter().map(|t| t.to_string()).collect(),
            max_depth: None,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail when the root selector matches nothing
    #[default]
    Strict,
    /// Render the whole document instead
    Lenient,
}
