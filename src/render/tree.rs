//! Recursive document tree to text rendering.
//!
//! Block and inline layout is approximated from tag names alone: inline
//! elements are followed by a space, block elements by a newline. Tables
//! become separator-joined rows and list items become single lines.

use crate::error::{Error, Result};
use crate::model::{Element, Node};

use super::normalize::normalize_text;
use super::{ExtractionStats, ListMode, RenderOptions};

/// Elements followed by a line break.
pub const BLOCK_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "section",
    "article",
    "header",
    "footer",
    "aside",
    "nav",
    "main",
];

/// Elements that get neither the inline space nor the block newline.
const UNSPACED_TAGS: &[&str] = &["table", "ul", "ol"];

const LIST_TAGS: &[&str] = &["ul", "ol"];

/// Check if a tag is block-level.
pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Traversal state threaded through recursive calls.
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    /// Some ancestor is an `<li>`
    in_list_item: bool,
    /// Number of elements entered so far
    depth: usize,
}

impl Context {
    fn enter(self, limit: Option<usize>) -> Result<Self> {
        let depth = self.depth + 1;
        match limit {
            Some(limit) if depth > limit => Err(Error::DepthLimit(limit)),
            _ => Ok(Self { depth, ..self }),
        }
    }

    fn inside_list_item(self) -> Self {
        Self {
            in_list_item: true,
            ..self
        }
    }
}

/// How an element is rendered.
enum ElementKind<'n> {
    Table(&'n Element),
    ListItem(&'n Element),
    LineBreak,
    List(&'n Element),
    Container(&'n Element),
}

impl<'n> ElementKind<'n> {
    fn of(element: &'n Element, list_mode: ListMode) -> Self {
        match element.tag.as_str() {
            "table" => ElementKind::Table(element),
            "li" => ElementKind::ListItem(element),
            "br" => ElementKind::LineBreak,
            "ul" | "ol" if list_mode == ListMode::Marked => ElementKind::List(element),
            _ => ElementKind::Container(element),
        }
    }
}

/// Depth-first, preorder renderer of a document tree.
pub struct TreeRenderer<'o> {
    options: &'o RenderOptions,
    stats: ExtractionStats,
}

impl<'o> TreeRenderer<'o> {
    /// Create a renderer.
    pub fn new(options: &'o RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::default(),
        }
    }

    /// Render a root element to raw text (before cleanup).
    pub fn render(&mut self, root: &Element) -> Result<String> {
        let mut out = String::new();
        self.render_element(root, Context::default(), &mut out)?;
        Ok(out)
    }

    /// Render any node to raw text.
    pub fn render_node(&mut self, node: &Node) -> Result<String> {
        let mut out = String::new();
        self.render_into(node, Context::default(), &mut out)?;
        Ok(out)
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    /// Consume the renderer, returning its statistics.
    pub fn into_stats(self) -> ExtractionStats {
        self.stats
    }

    fn render_into(&mut self, node: &Node, ctx: Context, out: &mut String) -> Result<()> {
        match node {
            Node::Text(raw) => {
                self.render_text(raw, out);
                Ok(())
            }
            Node::Element(element) => self.render_element(element, ctx, out),
        }
    }

    fn render_element(&mut self, element: &Element, ctx: Context, out: &mut String) -> Result<()> {
        let inner = ctx.enter(self.options.max_depth)?;

        match ElementKind::of(element, self.options.list_mode) {
            ElementKind::Table(table) => self.render_table(table, inner, out)?,
            ElementKind::ListItem(item) => self.render_list_item(item, inner, out)?,
            ElementKind::LineBreak => {
                self.stats.add_line_break();
                out.push('\n');
            }
            ElementKind::List(list) => self.render_list(list, inner, out)?,
            ElementKind::Container(container) => {
                for child in &container.children {
                    self.render_into(child, inner, out)?;
                }
                if LIST_TAGS.contains(&container.tag.as_str()) && !container.has_descendant("li") {
                    self.render_list(container, inner, out)?;
                }
            }
        }

        close_element(&element.tag, ctx, out);
        Ok(())
    }

    fn render_text(&mut self, raw: &str, out: &mut String) {
        let text = normalize_text(raw);
        if !text.is_empty() {
            self.stats.add_text_run();
            out.push_str(&text);
            out.push(' ');
        }
    }

    /// Render a node into a fresh buffer and return it trimmed.
    fn render_trimmed(&mut self, node: &Node, ctx: Context) -> Result<String> {
        let mut buf = String::new();
        self.render_into(node, ctx, &mut buf)?;
        Ok(buf.trim().to_string())
    }

    fn render_element_trimmed(&mut self, element: &Element, ctx: Context) -> Result<String> {
        let mut buf = String::new();
        self.render_element(element, ctx, &mut buf)?;
        Ok(buf.trim().to_string())
    }

    /// One line per `<li>`: every child rendered on its own, trimmed, and the
    /// non-empty parts joined with the separator.
    fn render_list_item(&mut self, item: &Element, ctx: Context, out: &mut String) -> Result<()> {
        let ctx = ctx.inside_list_item();
        let mut parts = Vec::new();
        for child in &item.children {
            let part = self.render_trimmed(child, ctx)?;
            if !part.is_empty() {
                parts.push(part);
            }
        }

        if !parts.is_empty() {
            self.stats.add_list_item();
            out.push_str(&parts.join(&self.options.separator));
            out.push('\n');
        }
        Ok(())
    }

    /// Rows of this table (not of nested ones), cells joined with the separator.
    fn render_table(&mut self, table: &Element, ctx: Context, out: &mut String) -> Result<()> {
        let rows = table.nearest_descendants(&["tr"], &["table"]);
        if rows.is_empty() {
            return Ok(());
        }
        self.stats.add_table();

        out.push('\n');
        for row in rows {
            let mut cells = Vec::new();
            for cell in row.nearest_descendants(&["td", "th"], &["table", "tr"]) {
                let text = self.render_element_trimmed(cell, ctx)?;
                if !text.is_empty() {
                    cells.push(text);
                }
            }

            let line = cells.join(&self.options.separator);
            if !line.trim().is_empty() {
                self.stats.add_row();
                out.push_str(&line);
                out.push('\n');
            }
        }
        out.push('\n');
        Ok(())
    }

    /// Items of this list (not of nested ones), each prefixed with the marker.
    fn render_list(&mut self, list: &Element, ctx: Context, out: &mut String) -> Result<()> {
        for item in list.nearest_descendants(&["li"], LIST_TAGS) {
            let text = self.render_element_trimmed(item, ctx)?;
            if !text.is_empty() {
                out.push_str(&self.options.list_marker);
                out.push_str(&text);
                out.push('\n');
            }
        }
        out.push('\n');
        Ok(())
    }
}

/// Append the inline space and/or block newline that follow an element.
///
/// A `<div>` inside a list item stays inline so the item keeps to one line.
fn close_element(tag: &str, ctx: Context, out: &mut String) {
    let block = is_block_tag(tag);
    if !block && !UNSPACED_TAGS.contains(&tag) {
        out.push(' ');
    }
    if block || (tag == "div" && !ctx.in_list_item) {
        out.push('\n');
    }
}
