//! Keyboard navigation keys
//!
//! Maps the standard key names carried in keydown details onto tab-list
//! movements. Anything not listed here is left to the host's default
//! handling.

/// A navigation movement within an ordered trigger list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// ArrowLeft: previous trigger, wrapping from the first to the last
    Previous,
    /// ArrowRight: next trigger, wrapping from the last to the first
    Next,
    /// Home: first trigger
    First,
    /// End: last trigger
    Last,
}

impl NavKey {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Previous),
            "ArrowRight" => Some(Self::Next),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            _ => None,
        }
    }

    /// Index this movement lands on from `current` in a list of `len`
    /// triggers. `len` must be non-zero.
    pub fn target_index(&self, current: usize, len: usize) -> usize {
        match self {
            Self::Previous => {
                if current == 0 {
                    len - 1
                } else {
                    current - 1
                }
            }
            Self::Next => {
                if current + 1 >= len {
                    0
                } else {
                    current + 1
                }
            }
            Self::First => 0,
            Self::Last => len - 1,
        }
    }
}
