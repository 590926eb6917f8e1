//! Plain text rendering for document trees.

use crate::error::Result;
use crate::model::Element;

use super::{CleanupPipeline, RenderOptions, RenderResult, TreeRenderer};

/// Convert a document tree to plain text.
pub fn to_text(root: &Element, options: &RenderOptions) -> Result<String> {
    Ok(to_text_with_stats(root, options)?.content)
}

/// Convert a document tree to plain text, keeping statistics when requested.
pub fn to_text_with_stats(root: &Element, options: &RenderOptions) -> Result<RenderResult> {
    let mut renderer = TreeRenderer::new(options);
    let raw = renderer.render(root)?;

    let pipeline = CleanupPipeline::new(options.cleanup.clone());
    let content = pipeline.process(&raw);

    if !options.collect_stats {
        return Ok(RenderResult::content_only(content));
    }

    let mut stats = renderer.into_stats();
    stats.count_text(&content);
    log::debug!(
        "Rendered {} text runs, {} tables, {} list items into {} words",
        stats.text_run_count,
        stats.table_count,
        stats.list_item_count,
        stats.word_count
    );
    Ok(RenderResult::new(content, stats))
}
