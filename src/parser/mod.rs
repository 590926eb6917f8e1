//! HTML parsing module.

mod html;
mod options;
mod sanitize;

pub use html::HtmlParser;
pub use options::{ErrorMode, ParseOptions, DEFAULT_STRIP_TAGS};
pub use sanitize::{sanitize, strip_scripts_and_styles};
