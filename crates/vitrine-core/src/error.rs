//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tabs error: {0}")]
    Tabs(#[from] vitrine_tabs::TabsError),

    #[error("Swatch error: {0}")]
    Swatch(#[from] vitrine_swatches::SwatchError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No tab group at index {0}")]
    UnknownTabGroup(usize),
}
