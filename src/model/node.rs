/// Parent reference marking the top of an outline.
///
/// Compared case-insensitively; Info files spell it `(dir)` but older
/// generators emitted `(DIR)`.
pub const DIR_NODE: &str = "(dir)";

/// One page of a help document.
///
/// A freshly read node has no children. Assembly moves nodes out of the
/// [`NodeStore`](super::NodeStore) into their parent's `children`, in sibling
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct InfoNode {
    /// Node name, unique within one document.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Parent reference as written in the source.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "String::is_empty"))]
    pub up: String,
    /// Previous sibling reference. Empty or equal to `up` for a first child.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "String::is_empty"))]
    pub prev: String,
    /// Next sibling reference. Informational only.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "String::is_empty"))]
    pub next: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<InfoNode>,
}

impl InfoNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_up(mut self, up: impl Into<String>) -> Self {
        self.up = up.into();
        self
    }

    pub fn with_prev(mut self, prev: impl Into<String>) -> Self {
        self.prev = prev.into();
        self
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = next.into();
        self
    }

    pub fn with_child(mut self, child: InfoNode) -> Self {
        self.children.push(child);
        self
    }

    /// True when the parent reference is the `(dir)` sentinel.
    pub fn is_top(&self) -> bool {
        self.up.eq_ignore_ascii_case(DIR_NODE)
    }

    /// True when this node opens its sibling chain.
    pub fn is_first_sibling(&self) -> bool {
        self.prev.is_empty() || self.prev == self.up
    }

    /// True when this node names `sibling` as its predecessor.
    pub fn follows(&self, sibling: &InfoNode) -> bool {
        self.prev == sibling.name
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Find a node by name in this subtree (pre-order).
    pub fn find(&self, name: &str) -> Option<&InfoNode> {
        self.iter().find(|node| node.name == name)
    }

    /// Depth-first, pre-order iterator over this subtree.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`InfoNode::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a InfoNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a InfoNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
