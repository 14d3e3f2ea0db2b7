use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    UnsupportedPlaybackRate(f64),
    InvalidContentId(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnsupportedPlaybackRate(rate) => {
                write!(f, "unsupported playback rate: {rate}")
            }
            ModelError::InvalidContentId(raw) => {
                write!(f, "invalid content id: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
