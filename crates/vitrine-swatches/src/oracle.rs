use vitrine_product::Variant;

/// Decides whether a swatch value is purchasable under a given variant.
///
/// The swatch selector consults the oracle only inside
/// `update_availability`; swapping in a real implementation changes no
/// call sites.
pub trait AvailabilityOracle: Send + Sync {
    fn is_available(&self, variant: &Variant, value: &str) -> bool;
}

/// Treats every value as purchasable. A real answer would need product
/// inventory data the page does not carry.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysAvailable;

impl AvailabilityOracle for AlwaysAvailable {
    fn is_available(&self, _variant: &Variant, _value: &str) -> bool {
        true
    }
}
