use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabsError {
    #[error("Tab index {index} out of bounds ({len} tabs)")]
    IndexOutOfBounds { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, TabsError>;
