//! Page event vocabulary
//!
//! Event names and payload shapes shared by the components and the host
//! page. Payloads travel as JSON details on bubbling events, so hosts can
//! produce and consume them without linking against the component crates.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::Variant;

/// Fired by the host page (or a variant-selector widget) whenever the
/// resolved variant changes. Detail: `{"variant": {...}}`.
pub const VARIANT_CHANGE: &str = "variant:change";

/// Broadcast by the swatch selector after a swatch is chosen.
/// Detail: `{"value": "...", "optionName": "..."}`.
pub const SWATCH_CHANGE: &str = "swatch:change";

/// Fired by the host when it re-renders a page section in authoring mode.
pub const SECTION_LOAD: &str = "section:load";

/// Payload of the [`SWATCH_CHANGE`] broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwatchChange {
    pub value: String,
    #[serde(rename = "optionName")]
    pub option_name: String,
}

impl SwatchChange {
    pub fn new(value: &str, option_name: &str) -> Self {
        Self {
            value: value.to_string(),
            option_name: option_name.to_string(),
        }
    }

    pub fn to_detail(&self) -> Value {
        json!({ "value": self.value, "optionName": self.option_name })
    }

    /// Parse a broadcast detail. Returns `None` when either key is absent
    /// or not a string.
    pub fn from_detail(detail: &Value) -> Option<Self> {
        Some(Self {
            value: detail.get("value")?.as_str()?.to_string(),
            option_name: detail.get("optionName")?.as_str()?.to_string(),
        })
    }
}

/// Build the detail payload of a [`VARIANT_CHANGE`] event.
pub fn variant_change_detail(variant: &Variant) -> Value {
    json!({ "variant": variant })
}

/// Extract the variant from a [`VARIANT_CHANGE`] detail. Returns `None`
/// when the `variant` key is absent or malformed, which consumers treat
/// as "leave current rendering alone".
pub fn variant_from_detail(detail: &Value) -> Option<Variant> {
    serde_json::from_value(detail.get("variant")?.clone()).ok()
}
