//! Node readers: the sources that feed records into a hierarchy build.
//!
//! The [`NodeReader`] trait is the boundary between document formats and the
//! assembler. Two implementations ship with the crate:
//! - [`InfoReader`] walks GNU Info files found on an [`InfoPath`]
//! - [`MemoryReader`] serves records held in memory

mod decode;
mod header;
mod memory;
mod path;
mod reader;

pub use memory::MemoryReader;
pub use path::InfoPath;
pub use reader::InfoReader;

use bitflags::bitflags;

use crate::error::ReaderError;
use crate::model::InfoNode;

bitflags! {
    /// Which node fields a reader should fill in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Fields: u8 {
        const NAME = 1 << 0;
        const TITLE = 1 << 1;
        /// `up`, `prev` and `next`.
        const NEIGHBOURS = 1 << 2;
    }
}

/// A stream of node records for one topic at a time.
pub trait NodeReader {
    /// Position the reader at the start of `topic`, dropping any previous one.
    fn open(&mut self, topic: &str) -> Result<(), ReaderError>;

    /// Read the next record.
    ///
    /// `Ok(None)` marks the end of the stream. Fields not named in `fields`
    /// are left empty.
    fn next_node(&mut self, fields: Fields) -> Result<Option<InfoNode>, ReaderError>;
}

impl<R: NodeReader + ?Sized> NodeReader for Box<R> {
    fn open(&mut self, topic: &str) -> Result<(), ReaderError> {
        (**self).open(topic)
    }

    fn next_node(&mut self, fields: Fields) -> Result<Option<InfoNode>, ReaderError> {
        (**self).next_node(fields)
    }
}

/// Clear the fields of `node` that were not requested.
pub(crate) fn mask_fields(mut node: InfoNode, fields: Fields) -> InfoNode {
    if !fields.contains(Fields::NAME) {
        node.name.clear();
    }
    if !fields.contains(Fields::TITLE) {
        node.title.clear();
    }
    if !fields.contains(Fields::NEIGHBOURS) {
        node.up.clear();
        node.prev.clear();
        node.next.clear();
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_union() {
        let fields = Fields::NAME | Fields::TITLE;
        assert!(fields.contains(Fields::NAME));
        assert!(fields.contains(Fields::TITLE));
        assert!(!fields.contains(Fields::NEIGHBOURS));
        assert_eq!(fields | Fields::NEIGHBOURS, Fields::all());
    }

    #[test]
    fn test_mask_fields() {
        let node = InfoNode::new("B")
            .with_title("Bee")
            .with_up("A")
            .with_prev("A")
            .with_next("C");
        let masked = mask_fields(node, Fields::NAME);
        assert_eq!(masked, InfoNode::new("B"));
    }
}
