use crate::operations::{Level, OperationType};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error(
        "Not enough unique numbers in range {min}-{max} for {requested} values. \
         Try reducing matrix size or changing level/digits."
    )]
    RangeExhausted { min: i64, max: i64, requested: usize },

    #[error("Matrix size must be between {min} and {max}, got {size}")]
    InvalidSize { size: usize, min: usize, max: usize },

    #[error("Digit count must be between 1 and {max}, got {digits}")]
    InvalidDigits { digits: u32, max: u32 },

    #[error("{operation} is not offered at {level} level")]
    UnsupportedLevel { operation: OperationType, level: Level },

    #[error("{digits}-digit numbers are not offered for {operation} at {level} level")]
    UnsupportedDigits {
        operation: OperationType,
        level: Level,
        digits: u32,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("No matrix has been generated yet")]
    NoActiveGrid,
}
