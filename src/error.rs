//! Error type shared by the strict similarity check and the outer surfaces.
//!
//! The store itself never fails; these variants only show up where a caller
//! asked for stricter behaviour or handed us bad input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VecError {
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VecError>;
