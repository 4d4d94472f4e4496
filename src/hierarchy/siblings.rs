//! Sibling ordering from previous-sibling references.

use thiserror::Error;
use tracing::warn;

use crate::model::InfoNode;

/// Why a sibling group could not be put in order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("first child of `{parent}` not found")]
    MissingFirst { parent: String },

    #[error("next sibling of `{after}` not found")]
    MissingNext { after: String },
}

/// Reorder a same-parent group into the chain implied by `prev` links.
///
/// On failure the slice is left in an unspecified (but complete) order.
/// Groups in documentation outlines are small, so the quadratic scan is fine.
pub fn order_siblings(siblings: &mut [InfoNode]) -> Result<(), ChainError> {
    if siblings.is_empty() {
        return Ok(());
    }

    let Some(first) = siblings.iter().position(InfoNode::is_first_sibling) else {
        let err = ChainError::MissingFirst {
            parent: siblings[0].up.clone(),
        };
        warn!(group_size = siblings.len(), "{err}");
        return Err(err);
    };
    siblings.swap(0, first);

    for placed in 1..siblings.len() {
        let (done, rest) = siblings.split_at(placed);
        let prev = &done[placed - 1];
        let Some(offset) = rest.iter().position(|n| n.follows(prev)) else {
            let err = ChainError::MissingNext {
                after: prev.name.clone(),
            };
            warn!(parent = %prev.up, placed, remaining = rest.len(), "{err}");
            return Err(err);
        };
        siblings.swap(placed, placed + offset);
    }

    Ok(())
}
