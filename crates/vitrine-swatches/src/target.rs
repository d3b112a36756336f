//! Variant-selector target
//!
//! Adapts one option group of a host variant-selector widget (the
//! radio-style and dropdown-style kinds) to the selection-target trait.

use vitrine_dom::{Document, DomEvent, NodeId, CHANGE};

use crate::registry::OptionSelectionTarget;

/// One option group inside a variant-selector widget.
///
/// Radio inputs win over a dropdown when both exist; whichever control is
/// updated also emits a bubbling `change` so downstream logic reacts the
/// same way it would to a direct user selection.
pub struct VariantSelectorTarget {
    doc: Document,
    group: NodeId,
}

impl VariantSelectorTarget {
    pub fn new(doc: &Document, group: NodeId) -> Self {
        Self {
            doc: doc.clone(),
            group,
        }
    }
}

impl OptionSelectionTarget for VariantSelectorTarget {
    fn set_selected_value(&self, option_name: &str, value: &str) -> bool {
        if !self.doc.contains(self.group) {
            return false;
        }

        let inputs = self.doc.query_tag(self.group, "input");
        let matched = inputs
            .iter()
            .copied()
            .find(|input| self.doc.attr(*input, "value").as_deref() == Some(value));
        if let Some(input) = matched {
            for other in &inputs {
                self.doc.remove_attr(*other, "checked");
            }
            self.doc.set_attr(input, "checked", "");
            self.doc.dispatch(DomEvent::new(CHANGE, input));
            tracing::debug!(option = option_name, value, "selection mirrored into radio group");
            return true;
        }

        let Some(select) = self.doc.query_tag(self.group, "select").into_iter().next() else {
            return false;
        };
        let has_option = self
            .doc
            .query_tag(select, "option")
            .into_iter()
            .any(|option| self.doc.attr(option, "value").as_deref() == Some(value));
        if !has_option {
            return false;
        }
        self.doc.set_attr(select, "value", value);
        self.doc.dispatch(DomEvent::new(CHANGE, select));
        tracing::debug!(option = option_name, value, "selection mirrored into dropdown");
        true
    }
}
