use arrayvec::ArrayVec;

use crate::error::LayoutError;

/// Maximum supported rank, matching the fixed dimension slots of the native
/// array layout.
pub const MAX_NDIM: usize = 6;

/// Dimension extents of a buffer, one per axis.
pub type Dims = ArrayVec<usize, MAX_NDIM>;

/// Per-axis offsets between adjacent indices, in elements.
pub type Strides = ArrayVec<isize, MAX_NDIM>;

/// How a multi-dimensional buffer is laid out in linear memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryOrder {
    /// C order: the last index varies fastest.
    RowMajor,
    /// Fortran order: the first index varies fastest.
    ColumnMajor,
}

impl MemoryOrder {
    /// The strides a packed buffer with these extents has in this order.
    pub fn contiguous_strides(self, dims: &[usize]) -> Strides {
        let mut strides = Strides::new();
        match self {
            MemoryOrder::ColumnMajor => {
                let mut acc = 1isize;
                for &d in dims {
                    strides.push(acc);
                    acc *= d as isize;
                }
            }
            MemoryOrder::RowMajor => {
                let mut acc = 1isize;
                for &d in dims.iter().rev() {
                    strides.push(acc);
                    acc *= d as isize;
                }
                strides.reverse();
            }
        }
        strides
    }

    pub const fn transposed(self) -> MemoryOrder {
        match self {
            MemoryOrder::RowMajor => MemoryOrder::ColumnMajor,
            MemoryOrder::ColumnMajor => MemoryOrder::RowMajor,
        }
    }
}

/// Check the rank cap and collect extents into a [Dims].
pub(crate) fn check_dims(dims: &[usize]) -> Result<Dims, LayoutError> {
    if dims.len() > MAX_NDIM {
        return Err(LayoutError::TooManyDims {
            actual: dims.len(),
            max: MAX_NDIM,
        });
    }
    Ok(dims.iter().copied().collect())
}

/// Number of elements a buffer with these extents holds.
#[inline]
pub(crate) fn element_count(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Linear offset of a multi-index, or None when out of bounds or the index
/// rank disagrees with the buffer rank.
#[inline]
pub(crate) fn offset_checked(dims: &[usize], strides: &[isize], index: &[usize]) -> Option<usize> {
    if index.len() != dims.len() {
        return None;
    }
    let mut offset = 0isize;
    for ((&i, &d), &s) in index.iter().zip(dims).zip(strides) {
        if i >= d {
            return None;
        }
        offset += i as isize * s;
    }
    Some(offset as usize)
}

/// Whether `strides` is exactly the packed stride pattern of `dims` in
/// `order`. Degenerate buffers (rank < 2, or any extent <= 1) can match both
/// orders; the caller's tag stays authoritative for those.
pub(crate) fn matches_order(dims: &[usize], strides: &[isize], order: MemoryOrder) -> bool {
    if dims.len() != strides.len() {
        return false;
    }
    strides == order.contiguous_strides(dims).as_slice()
}
