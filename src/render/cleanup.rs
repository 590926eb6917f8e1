//! Final whitespace cleanup of rendered documents.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Three newlines with only whitespace between them, i.e. two or more blank lines.
static EXTRA_EMPTY_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());

/// Collapse two or more consecutive blank lines into exactly one.
///
/// Idempotent: the replacement never leaves three newlines separated only by
/// whitespace.
pub fn collapse_empty_lines(text: &str) -> String {
    EXTRA_EMPTY_LINES_RE.replace_all(text, "\n\n").into_owned()
}

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Collapse empty lines only; output matches the raw rendering otherwise
    #[default]
    Minimal,
    /// Minimal + trim every line and the whole output
    Standard,
    /// Standard + Unicode NFC normalization
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Trim leading and trailing whitespace on every line
    pub trim_lines: bool,

    /// Collapse runs of blank lines to a single blank line
    pub collapse_empty_lines: bool,

    /// Trim the whole output
    pub trim_output: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: false,
            trim_lines: false,
            collapse_empty_lines: true,
            trim_output: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            trim_lines: true,
            trim_output: true,
            ..Self::minimal()
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::minimal()
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.trim_lines {
            result = result
                .split('\n')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\n");
        }

        if self.options.collapse_empty_lines {
            result = collapse_empty_lines(&result);
        }

        if self.options.trim_output {
            result = result.trim().to_string();
        }

        result
    }
}
