use thiserror::Error;

use crate::dims::{Dims, MemoryOrder, Strides};

/// Error raised when a buffer's memory layout violates what an operation
/// requires. Every variant is detected before any element is touched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("Buffer is {actual:?} but the operation requires {required:?}")]
    WrongMemoryOrder {
        required: MemoryOrder,
        actual: MemoryOrder,
    },
    #[error("Buffer rank not supported (actual: {actual}, expected: {expected})")]
    RankMismatch { expected: usize, actual: usize },
    #[error("Buffer has too many dimensions (actual: {actual}, maximum: {max})")]
    TooManyDims { actual: usize, max: usize },
    #[error("Strides {strides:?} do not describe a {order:?} layout of {dims:?}")]
    StrideMismatch {
        dims: Dims,
        strides: Strides,
        order: MemoryOrder,
    },
    #[error("Buffer length does not match shape (actual: {actual}, expected: {expected})")]
    BufferSizeMismatch { expected: usize, actual: usize },
}
