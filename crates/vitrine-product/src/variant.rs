use serde::{Deserialize, Serialize};

/// A purchasable product variant as supplied by the host page.
///
/// Only `available` is required by the components; the remaining fields
/// mirror the host's variant JSON and unknown fields are ignored during
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    /// Host-assigned variant id
    pub id: Option<u64>,
    /// Display title, e.g. "Red / Small"
    pub title: Option<String>,
    /// Whether the variant can currently be purchased
    pub available: bool,
    /// Option values in option order, e.g. ["Red", "Small"]
    pub options: Vec<String>,
}

impl Variant {
    /// A purchasable variant with the given title.
    pub fn available(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            available: true,
            ..Self::default()
        }
    }

    /// A sold-out variant with the given title.
    pub fn unavailable(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            available: false,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| (*o).to_string()).collect();
        self
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            available: false,
            options: Vec::new(),
        }
    }
}
