mod array;
mod bridge;
pub mod dims;
mod element;
mod error;
pub(crate) mod ffi;
pub(crate) mod mem;
pub mod ops;
mod view;

pub use array::Array;
pub use bridge::{doublify, NATIVE_ORDER};
pub use dims::{MemoryOrder, MAX_NDIM};
pub use element::{Element, ElementType, FloatElement};
pub use error::LayoutError;
pub use view::{ArrayView, ArrayViewMut};
