//! Vitrine Product Model
//!
//! Shared vocabulary for the product-page components: the variant value
//! object carried by change notifications, the event names the components
//! exchange, and the payload shapes those events carry.

mod events;
mod variant;

pub use events::{
    variant_change_detail, variant_from_detail, SwatchChange, SECTION_LOAD, SWATCH_CHANGE,
    VARIANT_CHANGE,
};
pub use variant::Variant;
