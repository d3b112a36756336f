//! Selection targets
//!
//! Variant-selector widgets register here under their option name; the
//! swatch selector pushes selections through the registry instead of
//! searching the whole tree for widgets to poke.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Anything that can accept a mirrored option selection.
pub trait OptionSelectionTarget: Send + Sync {
    /// Apply `value` for `option_name`. Returns false when the target has
    /// no way to represent the value, letting the caller skip it silently.
    fn set_selected_value(&self, option_name: &str, value: &str) -> bool;
}

/// Cloneable map from option name to the targets interested in it.
///
/// Selections broadcast: every target registered under a name is offered
/// the value, not just the first.
#[derive(Clone, Default)]
pub struct SelectionRegistry {
    targets: Arc<RwLock<HashMap<String, Vec<Arc<dyn OptionSelectionTarget>>>>>,
}

impl SelectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, option_name: &str, target: Arc<dyn OptionSelectionTarget>) {
        self.targets
            .write()
            .entry(option_name.to_string())
            .or_default()
            .push(target);
        tracing::debug!(option = option_name, "registered selection target");
    }

    /// Offer `value` to every target registered under `option_name`.
    /// Returns how many targets applied it; an unknown name applies to
    /// zero targets.
    pub fn apply(&self, option_name: &str, value: &str) -> usize {
        // Snapshot first; targets dispatch events and may call back in
        let targets: Vec<Arc<dyn OptionSelectionTarget>> = self
            .targets
            .read()
            .get(option_name)
            .cloned()
            .unwrap_or_default();
        targets
            .iter()
            .filter(|target| target.set_selected_value(option_name, value))
            .count()
    }

    pub fn clear(&self) {
        self.targets.write().clear();
    }

    /// Total number of registered targets across all option names.
    pub fn len(&self) -> usize {
        self.targets.read().values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
