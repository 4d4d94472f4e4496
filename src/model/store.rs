use std::mem;

use super::InfoNode;

/// Result of [`NodeStore::take_unique`].
#[derive(Debug)]
pub enum Take {
    /// Exactly one node matched; it has been removed from the store.
    Found(InfoNode),
    /// Nothing matched.
    Missing,
    /// More than one node matched; the store is unchanged.
    Ambiguous(usize),
}

/// Unordered pool of detached nodes.
///
/// Nodes are held by value, so a node is either in the store or owned by
/// some parent's `children`, never both.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: Vec<InfoNode>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every stored node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, node: InfoNode) {
        self.nodes.push(node);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InfoNode> {
        self.nodes.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name == name)
    }

    /// Remove the single node matching `pred`.
    pub fn take_unique<P>(&mut self, pred: P) -> Take
    where
        P: Fn(&InfoNode) -> bool,
    {
        let mut matches = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| pred(*n))
            .map(|(i, _)| i);

        match (matches.next(), matches.count()) {
            (None, _) => Take::Missing,
            (Some(idx), 0) => Take::Found(self.nodes.swap_remove(idx)),
            (Some(_), rest) => Take::Ambiguous(rest + 1),
        }
    }

    /// Split the store, moving out every node matching `pred`.
    ///
    /// Relative order is kept on both sides, though nothing depends on it.
    pub fn drain_where<P>(&mut self, pred: P) -> Vec<InfoNode>
    where
        P: FnMut(&InfoNode) -> bool,
    {
        let (matched, rest): (Vec<_>, Vec<_>) =
            mem::take(&mut self.nodes).into_iter().partition(pred);
        self.nodes = rest;
        matched
    }

    /// Move every stored node out, leaving the store empty.
    pub fn take_all(&mut self) -> Vec<InfoNode> {
        mem::take(&mut self.nodes)
    }
}

impl Extend<InfoNode> for NodeStore {
    fn extend<I: IntoIterator<Item = InfoNode>>(&mut self, iter: I) {
        self.nodes.extend(iter);
    }
}

impl FromIterator<InfoNode> for NodeStore {
    fn from_iter<I: IntoIterator<Item = InfoNode>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}
