//! Document tree
//!
//! Arena-backed element tree behind a cheaply cloneable handle. All state a
//! widget renders into the tree can be read back out, but the tree itself is
//! never the source of truth for widget state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::event::ListenerId;
use crate::node::{Node, NodeId};

const ROOT: NodeId = NodeId(0);

/// Shared handle to an element tree.
///
/// All methods take `&self`; internal locking never spans a user callback,
/// so event handlers may freely mutate the tree they were dispatched from.
#[derive(Clone)]
pub struct Document {
    pub(crate) inner: Arc<RwLock<DocumentInner>>,
}

pub(crate) struct DocumentInner {
    /// Slot per allocated node; removed nodes become `None` and ids are
    /// never reused
    pub nodes: Vec<Option<Node>>,
    pub focused: Option<NodeId>,
    pub next_listener_id: u64,
    /// Reverse lookup for listener removal
    pub listener_index: HashMap<ListenerId, (NodeId, String)>,
}

impl DocumentInner {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Target followed by every ancestor up to the root.
    pub fn ancestor_chain(&self, id: NodeId) -> Option<Vec<NodeId>> {
        self.node(id)?;
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            chain.push(node_id);
            current = self.node(node_id).and_then(|n| n.parent);
        }
        Some(chain)
    }

    /// Depth-first preorder walk of `scope`'s descendants (`scope` excluded).
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = match self.node(scope) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return result,
        };

        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                result.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }

        result
    }
}

impl Document {
    /// Create an empty document containing only the root node.
    pub fn new() -> Self {
        let root = Node::new("#document");
        Self {
            inner: Arc::new(RwLock::new(DocumentInner {
                nodes: vec![Some(root)],
                focused: None,
                next_listener_id: 0,
                listener_index: HashMap::new(),
            })),
        }
    }

    /// The document root. Listeners attached here observe every bubbling
    /// event in the tree.
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Allocate a new detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut inner = self.inner.write();
        let id = NodeId(inner.nodes.len());
        inner.nodes.push(Some(Node::new(tag)));
        id
    }

    /// Attach `child` as the last child of `parent`, detaching it from its
    /// previous parent first. Attaching the root, a missing node, or an
    /// ancestor of `parent` is a silent no-op.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut inner = self.inner.write();
        if child == ROOT || parent == child {
            return;
        }
        if inner.node(parent).is_none() || inner.node(child).is_none() {
            return;
        }

        // Reject attachments that would create a cycle
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return;
            }
            current = inner.node(id).and_then(|n| n.parent);
        }

        if let Some(old_parent) = inner.node(child).and_then(|n| n.parent) {
            if let Some(node) = inner.node_mut(old_parent) {
                node.children.retain(|c| *c != child);
            }
        }

        if let Some(node) = inner.node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = inner.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    /// Detach `node` and drop it together with all descendants and their
    /// listeners. Removing the root or a missing node is a no-op.
    pub fn remove_subtree(&self, node: NodeId) {
        let mut inner = self.inner.write();
        if node == ROOT || inner.node(node).is_none() {
            return;
        }

        if let Some(parent) = inner.node(node).and_then(|n| n.parent) {
            if let Some(parent_node) = inner.node_mut(parent) {
                parent_node.children.retain(|c| *c != node);
            }
        }

        let mut dropped_listeners = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = inner.nodes.get_mut(id.0).and_then(|slot| slot.take()) {
                stack.extend(removed.children.iter().copied());
                for entries in removed.listeners.values() {
                    for entry in entries {
                        dropped_listeners.push(entry.id);
                    }
                }
            }
        }
        for id in dropped_listeners {
            inner.listener_index.remove(&id);
        }

        if let Some(focused) = inner.focused {
            if inner.node(focused).is_none() {
                inner.focused = None;
            }
        }
    }

    /// Whether the id refers to a live node.
    pub fn contains(&self, node: NodeId) -> bool {
        self.inner.read().node(node).is_some()
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.inner.read().node(node).map(|n| n.tag.clone())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.read().node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner
            .read()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.inner
            .read()
            .nodes
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    // === Classes ===

    pub fn add_class(&self, node: NodeId, class: &str) {
        let mut inner = self.inner.write();
        if let Some(n) = inner.node_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&self, node: NodeId, class: &str) {
        let mut inner = self.inner.write();
        if let Some(n) = inner.node_mut(node) {
            n.classes.retain(|c| c != class);
        }
    }

    /// Force a class on or off, the `classList.toggle(name, force)` analog.
    pub fn toggle_class(&self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Replace the whole class list, the `className = "..."` analog.
    pub fn set_classes(&self, node: NodeId, classes: &[&str]) {
        let mut inner = self.inner.write();
        if let Some(n) = inner.node_mut(node) {
            n.classes.clear();
            for class in classes {
                if !n.classes.iter().any(|c| c == class) {
                    n.classes.push((*class).to_string());
                }
            }
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.inner
            .read()
            .node(node)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.inner
            .read()
            .node(node)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    // === Attributes ===

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        let mut inner = self.inner.write();
        if let Some(n) = inner.node_mut(node) {
            n.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&self, node: NodeId, name: &str) {
        let mut inner = self.inner.write();
        if let Some(n) = inner.node_mut(node) {
            n.attrs.remove(name);
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.inner
            .read()
            .node(node)
            .and_then(|n| n.attrs.get(name).cloned())
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.inner
            .read()
            .node(node)
            .map(|n| n.attrs.contains_key(name))
            .unwrap_or(false)
    }

    // === Content ===

    /// Replace the node's rendered content (text or a raw markup fragment).
    pub fn set_text(&self, node: NodeId, text: &str) {
        let mut inner = self.inner.write();
        if let Some(n) = inner.node_mut(node) {
            n.text = text.to_string();
        }
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.inner.read().node(node).map(|n| n.text.clone())
    }

    // === Queries ===

    /// All descendants of `scope` carrying `class`, in document order.
    pub fn query_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let inner = self.inner.read();
        inner
            .descendants(scope)
            .into_iter()
            .filter(|id| {
                inner
                    .node(*id)
                    .map(|n| n.classes.iter().any(|c| c == class))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// All descendants of `scope` with the given tag, in document order.
    pub fn query_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        let inner = self.inner.read();
        inner
            .descendants(scope)
            .into_iter()
            .filter(|id| inner.node(*id).map(|n| n.tag == tag).unwrap_or(false))
            .collect()
    }

    /// All descendants of `scope` where attribute `name` equals `value`.
    pub fn query_attr(&self, scope: NodeId, name: &str, value: &str) -> Vec<NodeId> {
        let inner = self.inner.read();
        inner
            .descendants(scope)
            .into_iter()
            .filter(|id| {
                inner
                    .node(*id)
                    .and_then(|n| n.attrs.get(name))
                    .map(|v| v == value)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// All descendants of `scope` carrying attribute `name`, whatever its
    /// value.
    pub fn query_has_attr(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        let inner = self.inner.read();
        inner
            .descendants(scope)
            .into_iter()
            .filter(|id| {
                inner
                    .node(*id)
                    .map(|n| n.attrs.contains_key(name))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// First descendant of `scope` carrying `class`, the `querySelector`
    /// analog.
    pub fn first_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.query_class(scope, class).into_iter().next()
    }

    /// Nearest of `node` or its ancestors carrying `class`.
    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let inner = self.inner.read();
        let chain = inner.ancestor_chain(node)?;
        chain.into_iter().find(|id| {
            inner
                .node(*id)
                .map(|n| n.classes.iter().any(|c| c == class))
                .unwrap_or(false)
        })
    }

    // === Focus ===

    /// Move keyboard focus to `node`; focusing a missing node is a no-op.
    pub fn focus(&self, node: NodeId) {
        let mut inner = self.inner.write();
        if inner.node(node).is_some() {
            inner.focused = Some(node);
        }
    }

    pub fn blur(&self) {
        self.inner.write().focused = None;
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.inner.read().focused
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
