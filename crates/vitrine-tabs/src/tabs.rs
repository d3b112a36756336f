//! Tab group
//!
//! Binds a list of trigger buttons to a list of panels paired by position.
//! The active index lives on the group itself; classes and attributes on the
//! tree are a projection of that state, never the source of it.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use vitrine_dom::{Document, ListenerId, NodeId, CLICK, KEYDOWN};

use crate::error::{Result, TabsError};
use crate::keys::NavKey;

/// Class names a tab group discovers and renders with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsSelectors {
    /// Class naming each tab trigger button
    pub trigger: String,
    /// Class naming each tab panel
    pub panel: String,
    /// Class toggled onto the active trigger/panel pair
    pub active: String,
}

impl Default for TabsSelectors {
    fn default() -> Self {
        Self {
            trigger: "product-tab-button".to_string(),
            panel: "product-tab-panel".to_string(),
            active: "active".to_string(),
        }
    }
}

struct TabsInner {
    triggers: Vec<NodeId>,
    panels: Vec<NodeId>,
    active: Option<usize>,
    listeners: Vec<ListenerId>,
    selectors: TabsSelectors,
    disposed: bool,
}

/// A tabbed content switcher scoped to one container.
///
/// A group mounted over a container missing either triggers or panels is
/// inert: nothing is bound, nothing is rendered, every method is a no-op.
pub struct TabGroup {
    doc: Document,
    inner: Arc<RwLock<TabsInner>>,
}

impl TabGroup {
    /// Discover triggers and panels under `container` and bind activation
    /// and keyboard handling to each trigger.
    pub fn mount(doc: &Document, container: NodeId, selectors: &TabsSelectors) -> Self {
        let triggers = doc.query_class(container, &selectors.trigger);
        let panels = doc.query_class(container, &selectors.panel);

        // Markup may author an initially active tab
        let active = triggers
            .iter()
            .position(|t| doc.has_class(*t, &selectors.active));

        let inert = triggers.is_empty() || panels.is_empty();
        let inner = Arc::new(RwLock::new(TabsInner {
            triggers: triggers.clone(),
            panels,
            active,
            listeners: Vec::new(),
            selectors: selectors.clone(),
            disposed: false,
        }));
        let group = Self {
            doc: doc.clone(),
            inner,
        };

        if inert {
            tracing::debug!("tab container has no triggers or panels, staying inert");
            return group;
        }

        let mut listeners = Vec::new();
        for (index, trigger) in triggers.iter().enumerate() {
            let weak = Arc::downgrade(&group.inner);
            let doc_handle = doc.clone();
            if let Some(id) = doc.add_listener(*trigger, CLICK, move |_| {
                if let Some(inner) = weak.upgrade() {
                    apply(&doc_handle, &inner, index);
                }
            }) {
                listeners.push(id);
            }

            let weak = Arc::downgrade(&group.inner);
            let doc_handle = doc.clone();
            if let Some(id) = doc.add_listener(*trigger, KEYDOWN, move |event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let Some(key) = event
                    .detail
                    .get("key")
                    .and_then(|k| k.as_str())
                    .and_then(NavKey::parse)
                else {
                    return;
                };
                handle_key(&doc_handle, &inner, index, key);
            }) {
                listeners.push(id);
            }
        }
        group.inner.write().listeners = listeners;
        tracing::debug!(triggers = triggers.len(), "mounted tab group");

        group
    }

    /// Activate the trigger/panel pair at `index`. Exactly that pair ends up
    /// active; every other trigger drops out of the tab order. Idempotent.
    /// On an inert group this is a silent no-op.
    pub fn activate(&self, index: usize) -> Result<()> {
        let len = {
            let state = self.inner.read();
            if state.triggers.is_empty() || state.panels.is_empty() || state.disposed {
                return Ok(());
            }
            state.triggers.len()
        };
        if index >= len {
            return Err(TabsError::IndexOutOfBounds { index, len });
        }
        apply(&self.doc, &self.inner, index);
        Ok(())
    }

    /// Currently active index, if any pair has been activated (or the
    /// markup authored one).
    pub fn active(&self) -> Option<usize> {
        self.inner.read().active
    }

    /// Whether mount found nothing to bind.
    pub fn is_inert(&self) -> bool {
        let state = self.inner.read();
        state.triggers.is_empty() || state.panels.is_empty()
    }

    /// Detach every listener this group attached. Idempotent; the group
    /// stays no-op afterwards.
    pub fn dispose(&self) {
        let ids = {
            let mut state = self.inner.write();
            if state.disposed {
                return;
            }
            state.disposed = true;
            std::mem::take(&mut state.listeners)
        };
        for id in ids {
            self.doc.remove_listener(id);
        }
        tracing::debug!("tab group disposed");
    }
}

/// Set `index` active and project the state onto the tree.
fn apply(doc: &Document, inner: &RwLock<TabsInner>, index: usize) {
    let (triggers, panels, active_class) = {
        let mut state = inner.write();
        if state.disposed || index >= state.triggers.len() {
            return;
        }
        state.active = Some(index);
        (
            state.triggers.clone(),
            state.panels.clone(),
            state.selectors.active.clone(),
        )
    };

    for (i, trigger) in triggers.iter().enumerate() {
        let on = i == index;
        doc.toggle_class(*trigger, &active_class, on);
        doc.set_attr(*trigger, "aria-selected", if on { "true" } else { "false" });
        doc.set_attr(*trigger, "tabindex", if on { "0" } else { "-1" });
    }
    for (i, panel) in panels.iter().enumerate() {
        doc.toggle_class(*panel, &active_class, i == index);
    }
    tracing::debug!(index, "activated tab");
}

/// Resolve a navigation key pressed on trigger `index`, then activate and
/// focus the landing trigger.
fn handle_key(doc: &Document, inner: &RwLock<TabsInner>, index: usize, key: NavKey) {
    let target = {
        let state = inner.read();
        if state.disposed || state.triggers.is_empty() {
            return;
        }
        key.target_index(index, state.triggers.len())
    };
    apply(doc, inner, target);
    let trigger = inner.read().triggers.get(target).copied();
    if let Some(node) = trigger {
        doc.focus(node);
    }
}
