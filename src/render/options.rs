//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Options for rendering a document tree to text.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// How `<ul>` and `<ol>` are rendered
    pub list_mode: ListMode,

    /// Delimiter between table cells and between parts of a list item
    pub separator: String,

    /// Prefix of each item in a marked list
    pub list_marker: String,

    /// Maximum element nesting the renderer accepts (None = unlimited)
    pub max_depth: Option<usize>,

    /// Text cleanup options
    pub cleanup: CleanupOptions,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the list mode.
    pub fn with_list_mode(mut self, mode: ListMode) -> Self {
        self.list_mode = mode;
        self
    }

    /// Render lists with item markers.
    pub fn marked_lists(mut self) -> Self {
        self.list_mode = ListMode::Marked;
        self
    }

    /// Set the cell and list-part separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the list item marker.
    pub fn with_list_marker(mut self, marker: impl Into<String>) -> Self {
        self.list_marker = marker.into();
        self
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = CleanupOptions::from_preset(preset);
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            list_mode: ListMode::Inline,
            separator: " | ".to_string(),
            list_marker: "--- ".to_string(),
            max_depth: None,
            cleanup: CleanupOptions::default(),
            collect_stats: false,
        }
    }
}

/// How lists are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Each `<li>` becomes one separator-joined line; a list without any
    /// `<li>` only contributes a blank line
    #[default]
    Inline,
    /// Lists are rendered item by item, each line prefixed with the list marker
    Marked,
}
