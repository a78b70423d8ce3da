//! Error types for labfill-interpret.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    #[error("unknown sex: \"{0}\" (expected male or female)")]
    UnknownSex(String),
}

pub type Result<T> = std::result::Result<T, InterpretError>;
