//! Node storage

use std::collections::{BTreeMap, HashMap};

use crate::event::ListenerEntry;

/// Handle to a node in a [`Document`](crate::Document).
///
/// Ids are never reused; a handle to a removed node simply stops matching
/// anything, so holding on to one is always safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

pub(crate) struct Node {
    pub tag: String,
    /// Ordered, de-duplicated class list
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    /// Rendered inner content (text or a raw markup fragment)
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Listeners keyed by event name
    pub listeners: HashMap<String, Vec<ListenerEntry>>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            listeners: HashMap::new(),
        }
    }
}
