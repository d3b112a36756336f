//! Vitrine Tabs
//!
//! Tabbed content switcher for the product page. A [`TabGroup`] pairs
//! trigger buttons with panels by position, keeps the active index as
//! explicit state, and handles ArrowLeft/ArrowRight/Home/End with
//! wraparound roving tabindex.

mod error;
mod keys;
mod tabs;

pub use error::{Result, TabsError};
pub use keys::NavKey;
pub use tabs::{TabGroup, TabsSelectors};
