//! Vitrine Stock
//!
//! Availability indicator for the product page. A [`StockIndicator`] is a
//! passive render target: it subscribes to `variant:change` notifications
//! at the document root and repaints its status block wholesale on each
//! one. It holds no state of its own and never initiates anything.

mod indicator;

pub use indicator::{
    StockIndicator, StockSelectors, CLASS_IN_STOCK, CLASS_OUT_OF_STOCK, ICON_IN_STOCK,
    ICON_OUT_OF_STOCK, TEXT_IN_STOCK, TEXT_OUT_OF_STOCK,
};
