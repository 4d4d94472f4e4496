use std::collections::HashMap;
use std::collections::VecDeque;

use super::{Fields, NodeReader, mask_fields};
use crate::error::ReaderError;
use crate::model::InfoNode;

/// A [`NodeReader`] over records held in memory, keyed by topic.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    topics: HashMap<String, Vec<InfoNode>>,
    pending: Option<VecDeque<InfoNode>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the records served for `topic`, in stream order.
    pub fn with_topic(mut self, topic: impl Into<String>, nodes: Vec<InfoNode>) -> Self {
        self.topics.insert(topic.into(), nodes);
        self
    }
}

impl NodeReader for MemoryReader {
    fn open(&mut self, topic: &str) -> Result<(), ReaderError> {
        self.pending = None;
        let nodes = self
            .topics
            .get(topic)
            .ok_or_else(|| ReaderError::TopicNotFound(topic.to_string()))?;
        self.pending = Some(nodes.iter().cloned().collect());
        Ok(())
    }

    fn next_node(&mut self, fields: Fields) -> Result<Option<InfoNode>, ReaderError> {
        let pending = self.pending.as_mut().ok_or(ReaderError::NotOpen)?;
        Ok(pending.pop_front().map(|node| mask_fields(node, fields)))
    }
}
