//! Rendering module for converting document trees to text and records to JSON.

mod cleanup;
mod json;
mod normalize;
mod options;
mod result;
mod text;
mod tree;

pub use cleanup::{collapse_empty_lines, CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, JsonFormat};
pub use normalize::{collapse_whitespace, join_unpunctuated_breaks, join_wrapped_lines, normalize_text};
pub use options::{ListMode, RenderOptions};
pub use result::{ExtractionStats, RenderResult};
pub use text::{to_text, to_text_with_stats};
pub use tree::{is_block_tag, TreeRenderer, BLOCK_TAGS};
