use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwatchError {
    #[error("No swatch input with value: {0}")]
    UnknownValue(String),
}

pub type Result<T> = std::result::Result<T, SwatchError>;
