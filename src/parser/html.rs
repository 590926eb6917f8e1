//! HTML parser building the document tree.

use scraper::{ElementRef, Html, Node as DomNode, Selector};

use crate::error::{Error, Result};
use crate::model::{Element, Node};

use super::options::{ErrorMode, ParseOptions};
use super::sanitize::sanitize;

/// Parses HTML text into a sanitized [`Element`] tree.
///
/// Malformed markup is repaired by the html5ever tree builder the same way a
/// browser would; comments, doctypes and processing instructions are dropped.
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ParseOptions,
}

impl HtmlParser {
    /// Create a parser, validating the root selector up front.
    pub fn new(options: ParseOptions) -> Result<Self> {
        root_selector(&options.root_selector)?;
        Ok(Self { options })
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an HTML document and return its sanitized root element.
    pub fn parse(&self, html: &str) -> Result<Element> {
        let document = Html::parse_document(html);
        let selector = root_selector(&self.options.root_selector)?;

        let root = match document.select(&selector).next() {
            Some(root) => root,
            None => match self.options.error_mode {
                ErrorMode::Strict => {
                    return Err(Error::RootNotFound(self.options.root_selector.clone()))
                }
                ErrorMode::Lenient => {
                    log::warn!(
                        "Root selector '{}' matched nothing, rendering whole document",
                        self.options.root_selector
                    );
                    document.root_element()
                }
            },
        };

        let mut tree = self.convert(root, 1)?;
        let removed = sanitize(&mut tree, &self.options.strip_tags);
        if removed > 0 {
            log::debug!("Sanitizer removed {} non-content elements", removed);
        }
        Ok(tree)
    }

    /// Parse an HTML document from UTF-8 bytes.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Element> {
        let html = std::str::from_utf8(data).map_err(|e| Error::Encoding(e.to_string()))?;
        self.parse(html)
    }

    fn convert(&self, element: ElementRef<'_>, depth: usize) -> Result<Element> {
        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                return Err(Error::DepthLimit(limit));
            }
        }

        let mut out = Element::new(element.value().name());
        for child in element.children() {
            match child.value() {
                DomNode::Text(text) => out.push(Node::Text(text.to_string())),
                DomNode::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        out.push(self.convert(child_el, depth + 1)?);
                    }
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

fn root_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::InvalidSelector(format!("{}: {:?}", selector, e)))
}
