//! Document tree types.

use serde::{Deserialize, Serialize};

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Leaf holding a raw text run, exactly as it appeared in the source.
    Text(String),
    /// Element with a tag name and ordered children.
    Element(Element),
}

impl Node {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Get the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Depth of the subtree rooted at this node (a text node has depth 1).
    pub fn depth(&self) -> usize {
        match self {
            Node::Text(_) => 1,
            Node::Element(element) => element.depth(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// An element node.
///
/// Tag names are stored lowercase, the way an HTML parser reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            children: Vec::new(),
        }
    }

    /// Create an element holding a single text child.
    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag).child(Node::Text(text.into()))
    }

    /// Append a child, builder style.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append children, builder style.
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a child in place.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Check the tag name.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Iterate over element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Check whether any descendant (not self) has the given tag.
    pub fn has_descendant(&self, tag: &str) -> bool {
        self.child_elements()
            .any(|child| child.is(tag) || child.has_descendant(tag))
    }

    /// Collect the closest descendants whose tag is in `targets`.
    ///
    /// The walk does not descend into a match, nor into any element whose tag
    /// is in `barriers`. This keeps rows of a nested table out of the outer
    /// table, and items of a nested list out of the outer list.
    pub fn nearest_descendants<'a>(&'a self, targets: &[&str], barriers: &[&str]) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_nearest(targets, barriers, &mut found);
        found
    }

    fn collect_nearest<'a>(&'a self, targets: &[&str], barriers: &[&str], found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if targets.contains(&child.tag.as_str()) {
                found.push(child);
            } else if !barriers.contains(&child.tag.as_str()) {
                child.collect_nearest(targets, barriers, found);
            }
        }
    }

    /// Depth of the subtree rooted at this element.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Count of all nodes in the subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                Node::Text(_) => 1,
                Node::Element(element) => element.node_count(),
            })
            .sum::<usize>()
    }
}
