//! Tree assembly over a [`NodeStore`], with rollback.

use std::mem;

use tracing::{debug, warn};

use super::siblings::{ChainError, order_siblings};
use crate::error::BuildError;
use crate::model::{InfoNode, NodeStore, Take};

/// Assemble the stored nodes into a tree rooted at `root`.
///
/// An empty `root` selects the node whose parent is `(dir)`. Either way
/// exactly one candidate must exist. On success the tree's nodes have left
/// the store; nodes outside the tree stay behind. On failure every node
/// taken out is restored, so the store holds what it held before.
pub fn assemble(store: &mut NodeStore, root: &str) -> Result<InfoNode, BuildError> {
    let found = if root.is_empty() {
        store.take_unique(InfoNode::is_top)
    } else {
        store.take_unique(|n| n.name == root)
    };

    let mut top = match found {
        Take::Found(node) => node,
        Take::Missing => {
            debug!(root, stored = store.len(), "no root node");
            return Err(BuildError::NoHierarchy);
        }
        Take::Ambiguous(count) => {
            warn!(root, count, "more than one candidate root node");
            return Err(BuildError::NoHierarchy);
        }
    };

    match resolve_children(store, &mut top) {
        Ok(()) => {
            debug!(
                root = %top.name,
                nodes = top.count(),
                left = store.len(),
                "hierarchy assembled"
            );
            Ok(top)
        }
        Err(err) => {
            debug!(root = %top.name, error = %err, "assembly failed, rolling back");
            restore(store, top);
            Err(BuildError::NoHierarchy)
        }
    }
}

/// A node pulled out of the store while its subtree is collected.
struct Slot {
    node: InfoNode,
    /// Index of the parent slot; `None` for children of the root.
    parent: Option<usize>,
}

/// Move the stored descendants of `parent` under it, then order every
/// sibling group. Stops at the first broken group.
///
/// Descendants are collected breadth first and linked leaves first, so the
/// nesting depth of the outline never reaches the call stack. On failure the
/// nodes not yet linked under `parent` go back to the store; the caller
/// restores `parent` itself.
pub fn resolve_children(store: &mut NodeStore, parent: &mut InfoNode) -> Result<(), ChainError> {
    let mut slots: Vec<Slot> = store
        .drain_where(|n| n.up == parent.name)
        .into_iter()
        .map(|node| Slot { node, parent: None })
        .collect();

    let mut next = 0;
    while next < slots.len() {
        let name = slots[next].node.name.clone();
        let found = store.drain_where(|n| n.up == name);
        slots.extend(found.into_iter().map(|node| Slot {
            node,
            parent: Some(next),
        }));
        next += 1;
    }

    // Children always sit after their parent, so popping from the back
    // completes every group before its parent is linked.
    let mut top = Vec::new();
    while let Some(Slot { mut node, parent: up }) = slots.pop() {
        node.children.reverse();
        if let Err(err) = order_siblings(&mut node.children) {
            restore(store, node);
            for slot in slots.drain(..).rev() {
                restore(store, slot.node);
            }
            parent.children.extend(top);
            return Err(err);
        }
        match up {
            Some(index) => slots[index].node.children.push(node),
            None => top.push(node),
        }
    }

    top.reverse();
    parent.children.extend(top);
    order_siblings(&mut parent.children)
}

/// Return `node` and its whole subtree to the store, leaves first.
pub fn restore(store: &mut NodeStore, node: InfoNode) {
    let mut stack = vec![node];
    while let Some(mut node) = stack.pop() {
        if node.children.is_empty() {
            store.push(node);
            continue;
        }
        let children = mem::take(&mut node.children);
        stack.push(node);
        stack.extend(children.into_iter().rev());
    }
}
