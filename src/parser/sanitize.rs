//! Removal of non-content nodes from a document tree.

use crate::model::{Element, Node};

use super::options::DEFAULT_STRIP_TAGS;

/// Remove every element whose tag is in `tags`, at any depth, in place.
///
/// Returns the number of removed subtrees. Running it again on the same tree
/// removes nothing.
pub fn sanitize<S: AsRef<str>>(root: &mut Element, tags: &[S]) -> usize {
    let before = root.children.len();
    root.children.retain(|child| match child {
        Node::Element(el) => !tags.iter().any(|t| t.as_ref() == el.tag),
        Node::Text(_) => true,
    });
    let mut removed = before - root.children.len();

    for child in root.children.iter_mut() {
        if let Node::Element(el) = child {
            removed += sanitize(el, tags);
        }
    }
    removed
}

/// Remove `<script>` and `<style>` elements.
pub fn strip_scripts_and_styles(root: &mut Element) -> usize {
    sanitize(root, DEFAULT_STRIP_TAGS)
}
