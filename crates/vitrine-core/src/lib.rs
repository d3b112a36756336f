//! Vitrine Core
//!
//! Coordination layer for the product-page components. Owns page-wide
//! configuration and lifecycle; all widget state lives in Rust, the
//! element tree is a stateless render target.

mod config;
mod error;
mod page;

pub use config::PageConfig;
pub use error::CoreError;
pub use page::{ProductPage, BOUND_ATTR};

// Re-export the component surface
pub use vitrine_dom::{Document, DomEvent, ListenerId, NodeId, CHANGE, CLICK, KEYDOWN};
pub use vitrine_product::{
    variant_change_detail, variant_from_detail, SwatchChange, Variant, SECTION_LOAD,
    SWATCH_CHANGE, VARIANT_CHANGE,
};
pub use vitrine_stock::{StockIndicator, StockSelectors};
pub use vitrine_swatches::{
    AlwaysAvailable, AvailabilityOracle, OptionSelectionTarget, SelectionRegistry, SwatchError,
    SwatchSelector, SwatchSelectors, VariantSelectorTarget,
};
pub use vitrine_tabs::{NavKey, TabGroup, TabsError, TabsSelectors};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
