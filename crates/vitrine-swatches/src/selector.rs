//! Swatch selector
//!
//! Radio-style option swatches scoped to one container. Selection state
//! lives in an explicit map on the component; checked attributes on the
//! tree are a projection of it. Chosen values are mirrored into
//! variant-selector widgets through the selection registry and announced
//! with a bubbling broadcast.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use vitrine_dom::{Document, DomEvent, ListenerId, NodeId, CHANGE};
use vitrine_product::{SwatchChange, Variant, SWATCH_CHANGE};

use crate::error::{Result, SwatchError};
use crate::oracle::AvailabilityOracle;
use crate::registry::SelectionRegistry;

/// Class names the swatch selector discovers and renders with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwatchSelectors {
    /// Class naming each swatch input
    pub input: String,
    /// Class of the item element enclosing each input
    pub item: String,
    /// Class marking an item whose value is not purchasable
    pub unavailable: String,
}

impl Default for SwatchSelectors {
    fn default() -> Self {
        Self {
            input: "swatch-input".to_string(),
            item: "swatch-item".to_string(),
            unavailable: "swatch-unavailable".to_string(),
        }
    }
}

struct SwatchInner {
    inputs: Vec<NodeId>,
    /// Option name to selected value; radio semantics per name
    selected: HashMap<String, String>,
    listeners: Vec<ListenerId>,
    disposed: bool,
}

/// Option swatch group scoped to one container.
///
/// Mounted over a container with no swatch inputs the instance is inert:
/// nothing is bound, nothing is rendered, every method is a no-op.
pub struct SwatchSelector {
    doc: Document,
    container: NodeId,
    selectors: SwatchSelectors,
    registry: SelectionRegistry,
    oracle: Arc<dyn AvailabilityOracle>,
    inner: Arc<RwLock<SwatchInner>>,
}

impl SwatchSelector {
    /// Discover swatch inputs under `container`, force-check the first one
    /// when none is checked, and bind change handling to each input.
    pub fn mount(
        doc: &Document,
        container: NodeId,
        selectors: &SwatchSelectors,
        registry: SelectionRegistry,
        oracle: Arc<dyn AvailabilityOracle>,
    ) -> Self {
        let inputs = doc.query_class(container, &selectors.input);

        let inner = Arc::new(RwLock::new(SwatchInner {
            inputs: inputs.clone(),
            selected: HashMap::new(),
            listeners: Vec::new(),
            disposed: false,
        }));
        let selector = Self {
            doc: doc.clone(),
            container,
            selectors: selectors.clone(),
            registry: registry.clone(),
            oracle,
            inner,
        };

        if inputs.is_empty() {
            tracing::debug!("swatch container has no inputs, staying inert");
            return selector;
        }

        // Default selection: first input in document order, attribute only.
        // No change event fires and nothing propagates.
        if !inputs.iter().any(|i| doc.has_attr(*i, "checked")) {
            doc.set_attr(inputs[0], "checked", "");
        }

        {
            let mut state = selector.inner.write();
            for input in &inputs {
                if !doc.has_attr(*input, "checked") {
                    continue;
                }
                if let (Some(name), Some(value)) =
                    (doc.attr(*input, "name"), doc.attr(*input, "value"))
                {
                    state.selected.insert(name, value);
                }
            }
        }

        let mut listeners = Vec::new();
        for input in &inputs {
            let weak = Arc::downgrade(&selector.inner);
            let doc_handle = doc.clone();
            let registry = registry.clone();
            let input_node = *input;
            if let Some(id) = doc.add_listener(*input, CHANGE, move |_| {
                if let Some(inner) = weak.upgrade() {
                    handle_change(&doc_handle, &inner, &registry, container, input_node);
                }
            }) {
                listeners.push(id);
            }
        }
        selector.inner.write().listeners = listeners;
        tracing::debug!(inputs = inputs.len(), "mounted swatch selector");

        selector
    }

    /// Programmatic selection by value, equivalent to the user checking
    /// that swatch. Unknown values error; inert and disposed instances
    /// no-op.
    pub fn select(&self, value: &str) -> Result<()> {
        let input = {
            let state = self.inner.read();
            if state.disposed || state.inputs.is_empty() {
                return Ok(());
            }
            state
                .inputs
                .iter()
                .copied()
                .find(|i| self.doc.attr(*i, "value").as_deref() == Some(value))
        };
        let Some(input) = input else {
            return Err(SwatchError::UnknownValue(value.to_string()));
        };

        self.doc.set_attr(input, "checked", "");
        self.doc.dispatch(DomEvent::new(CHANGE, input));
        Ok(())
    }

    /// Re-render availability of every swatch from the oracle's answers.
    /// Unavailable values get a disabled input and a marker class on the
    /// enclosing item; inputs outside an item are left untouched.
    pub fn update_availability(&self, variant: &Variant) {
        let inputs = {
            let state = self.inner.read();
            if state.disposed {
                return;
            }
            state.inputs.clone()
        };

        for input in inputs {
            let Some(item) = self.doc.closest(input, &self.selectors.item) else {
                continue;
            };
            let value = self.doc.attr(input, "value").unwrap_or_default();
            let available = self.oracle.is_available(variant, &value);
            if available {
                self.doc.remove_attr(input, "disabled");
            } else {
                self.doc.set_attr(input, "disabled", "");
            }
            self.doc
                .toggle_class(item, &self.selectors.unavailable, !available);
        }
    }

    /// Currently selected value for an option name, if any.
    pub fn selected_value(&self, option_name: &str) -> Option<String> {
        self.inner.read().selected.get(option_name).cloned()
    }

    /// Whether mount found nothing to bind.
    pub fn is_inert(&self) -> bool {
        self.inner.read().inputs.is_empty()
    }

    /// Detach every listener this selector attached. Idempotent; the
    /// selector stays no-op afterwards.
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
        tracing::debug!("swatch selector disposed");
    }
}

/// React to a change on one swatch input: record the selection, enforce
/// single-select within the name group, mirror into registered targets,
/// then broadcast.
fn handle_change(
    doc: &Document,
    inner: &RwLock<SwatchInner>,
    registry: &SelectionRegistry,
    container: NodeId,
    input: NodeId,
) {
    if inner.read().disposed {
        return;
    }
    // Some input kinds emit a change when unchecked; ignore those
    if !doc.has_attr(input, "checked") {
        return;
    }
    let (Some(name), Some(value)) = (doc.attr(input, "name"), doc.attr(input, "value")) else {
        return;
    };

    let group = {
        let mut state = inner.write();
        state.selected.insert(name.clone(), value.clone());
        state.inputs.clone()
    };
    for other in group {
        if other != input && doc.attr(other, "name").as_deref() == Some(name.as_str()) {
            doc.remove_attr(other, "checked");
        }
    }

    let applied = registry.apply(&name, &value);
    tracing::debug!(option = %name, value = %value, targets = applied, "swatch selection propagated");

    let detail = SwatchChange::new(&value, &name).to_detail();
    doc.dispatch(DomEvent::new(SWATCH_CHANGE, container).with_detail(detail));
}
