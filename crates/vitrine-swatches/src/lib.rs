//! Vitrine Swatches
//!
//! Option swatch selection for the product page. A [`SwatchSelector`]
//! owns the selected value per option name, mirrors selections into
//! variant-selector widgets registered in a [`SelectionRegistry`], and
//! broadcasts every change as a bubbling `swatch:change` event.
//!
//! Availability rendering is delegated to an [`AvailabilityOracle`]; the
//! shipped [`AlwaysAvailable`] stub keeps every swatch enabled.

mod error;
mod oracle;
mod registry;
mod selector;
mod target;

pub use error::{Result, SwatchError};
pub use oracle::{AlwaysAvailable, AvailabilityOracle};
pub use registry::{OptionSelectionTarget, SelectionRegistry};
pub use selector::{SwatchSelector, SwatchSelectors};
pub use target::VariantSelectorTarget;
