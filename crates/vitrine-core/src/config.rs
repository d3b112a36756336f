//! Page configuration

use serde::{Deserialize, Serialize};

use vitrine_stock::StockSelectors;
use vitrine_swatches::SwatchSelectors;
use vitrine_tabs::TabsSelectors;

/// Discovery and rendering configuration for one product page.
///
/// Defaults match the stock theme markup; hosts with renamed classes
/// override the relevant fields, typically from a JSON settings blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Class of each tab group container
    pub tabs_container: String,
    /// Class of each swatch container
    pub swatches_container: String,
    /// Class of each stock indicator root
    pub stock_container: String,
    /// Tags of the host's variant-selector widgets
    pub variant_selector_tags: Vec<String>,
    /// Attribute keying an option group inside a variant selector
    pub option_name_attr: String,
    /// Rebind automatically when the host signals a section reload
    pub design_mode: bool,
    /// Tab group class names
    pub tabs: TabsSelectors,
    /// Swatch selector class names
    pub swatches: SwatchSelectors,
    /// Stock indicator class names
    pub stock: StockSelectors,
}

impl PageConfig {
    /// Parse a configuration from its JSON form. Absent fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            tabs_container: "product-tabs-wrapper".to_string(),
            swatches_container: "product-variant-swatches".to_string(),
            stock_container: "product-stock-indicator".to_string(),
            variant_selector_tags: vec![
                "variant-selects".to_string(),
                "variant-radios".to_string(),
            ],
            option_name_attr: "data-option-name".to_string(),
            design_mode: false,
            tabs: TabsSelectors::default(),
            swatches: SwatchSelectors::default(),
            stock: StockSelectors::default(),
        }
    }
}
