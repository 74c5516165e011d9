use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidMediaKind(String),
    InvalidTimeWindow(String),
    InvalidDate(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidMediaKind(raw) => {
                write!(f, "invalid media kind: {raw}")
            }
            ModelError::InvalidTimeWindow(raw) => {
                write!(f, "invalid time window: {raw}")
            }
            ModelError::InvalidDate(raw) => write!(f, "invalid date: {raw}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
