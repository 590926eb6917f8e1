//! Model types for extraction.
//!
//! The document tree is the renderer's input: a plain owned structure built
//! by the HTML parser, free of any live DOM. Records are the output of the
//! record assembler.

mod node;
mod record;

pub use node::{Element, Node};
pub use record::{DateGroup, DateGroups, Record};
