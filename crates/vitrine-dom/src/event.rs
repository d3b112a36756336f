//! Synchronous event dispatch
//!
//! Events are plain values carrying a name, a target node and an optional
//! JSON detail. Dispatch runs every handler to completion on the calling
//! thread, bubbling from the target up to the root. Handler lists are
//! snapshotted before any handler runs, so handlers may add or remove
//! listeners and rebuild the subtree they were dispatched from.

use std::sync::Arc;

use serde_json::Value;

use crate::document::Document;
use crate::node::NodeId;

/// Name of the generic change event fired by form-style inputs.
pub const CHANGE: &str = "change";

/// Name of the activation event fired on buttons and other controls.
pub const CLICK: &str = "click";

/// Name of the keyboard event; detail carries `{"key": "..."}` using the
/// standard key names ("ArrowLeft", "Home", ...).
pub const KEYDOWN: &str = "keydown";

pub(crate) type Handler = Arc<dyn Fn(&DomEvent) + Send + Sync>;

pub(crate) struct ListenerEntry {
    pub id: ListenerId,
    pub handler: Handler,
}

/// Handle for removing a previously attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// An event travelling through the tree.
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub name: String,
    pub target: NodeId,
    pub detail: Value,
}

impl DomEvent {
    pub fn new(name: &str, target: NodeId) -> Self {
        Self {
            name: name.to_string(),
            target,
            detail: Value::Null,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = detail;
        self
    }
}

impl Document {
    /// Attach a handler for `name` events reaching `node`. Returns `None`
    /// when the node does not exist.
    pub fn add_listener<F>(&self, node: NodeId, name: &str, handler: F) -> Option<ListenerId>
    where
        F: Fn(&DomEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.write();
        inner.node(node)?;

        let id = ListenerId(inner.next_listener_id);
        inner.next_listener_id += 1;
        inner.listener_index.insert(id, (node, name.to_string()));
        if let Some(n) = inner.node_mut(node) {
            n.listeners.entry(name.to_string()).or_default().push(ListenerEntry {
                id,
                handler: Arc::new(handler),
            });
        }
        Some(id)
    }

    /// Detach a listener. Unknown or already removed ids are ignored.
    pub fn remove_listener(&self, id: ListenerId) {
        let mut inner = self.inner.write();
        let Some((node, name)) = inner.listener_index.remove(&id) else {
            return;
        };
        if let Some(n) = inner.node_mut(node) {
            if let Some(entries) = n.listeners.get_mut(&name) {
                entries.retain(|entry| entry.id != id);
                if entries.is_empty() {
                    n.listeners.remove(&name);
                }
            }
        }
    }

    /// Number of listeners for `name` attached directly to `node`.
    pub fn listener_count(&self, node: NodeId, name: &str) -> usize {
        self.inner
            .read()
            .node(node)
            .and_then(|n| n.listeners.get(name))
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Dispatch `event` at its target and bubble it through every ancestor
    /// up to the root. Handlers attached to a node run in registration
    /// order; each node's handler list is snapshotted just before it runs.
    /// Dispatching at a missing node does nothing.
    pub fn dispatch(&self, event: DomEvent) {
        let chain = {
            let inner = self.inner.read();
            match inner.ancestor_chain(event.target) {
                Some(chain) => chain,
                None => return,
            }
        };
        tracing::trace!(event = %event.name, target = ?event.target, "dispatching event");

        for node in chain {
            let handlers: Vec<Handler> = {
                let inner = self.inner.read();
                match inner.node(node) {
                    Some(n) => n
                        .listeners
                        .get(&event.name)
                        .map(|entries| entries.iter().map(|e| e.handler.clone()).collect())
                        .unwrap_or_default(),
                    // Node removed by an earlier handler mid-bubble
                    None => Vec::new(),
                }
            };
            for handler in handlers {
                handler(&event);
            }
        }
    }
}
