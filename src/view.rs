use crate::dims::{
    check_dims, element_count, matches_order, offset_checked, Dims, MemoryOrder, Strides,
};
use crate::element::{Element, ElementType};
use crate::error::LayoutError;

/// Non-owning description of a strided buffer: extents, strides (in
/// elements), a memory-order tag, and a borrow of the backing memory.
///
/// A view never owns the memory it describes; the lifetime parameter ties it
/// to the backing buffer. Strides are checked against the order tag at
/// construction, so a view that exists is internally consistent.
#[derive(Debug)]
pub struct ArrayView<'a, T: Element> {
    buf: &'a [T],
    dims: Dims,
    strides: Strides,
    order: MemoryOrder,
}

/// Mutable counterpart of [ArrayView]. The `&mut` borrow is what gives the
/// bridge exclusive access for the duration of one call.
pub struct ArrayViewMut<'a, T: Element> {
    buf: &'a mut [T],
    dims: Dims,
    strides: Strides,
    order: MemoryOrder,
}

fn checked_parts(
    buf_len: usize,
    dims: &[usize],
    order: MemoryOrder,
) -> Result<(Dims, Strides), LayoutError> {
    let dims = check_dims(dims)?;
    let expected = element_count(&dims);
    if buf_len != expected {
        return Err(LayoutError::BufferSizeMismatch {
            expected,
            actual: buf_len,
        });
    }
    let strides = order.contiguous_strides(&dims);
    Ok((dims, strides))
}

fn checked_strides(
    dims: &Dims,
    strides: &[isize],
    order: MemoryOrder,
) -> Result<Strides, LayoutError> {
    if !matches_order(dims, strides, order) {
        return Err(LayoutError::StrideMismatch {
            dims: dims.clone(),
            strides: strides.iter().copied().collect(),
            order,
        });
    }
    Ok(strides.iter().copied().collect())
}

macro_rules! view_accessors {
    () => {
        /// Rank of the described buffer.
        #[inline]
        pub fn ndim(&self) -> usize {
            self.dims.len()
        }

        /// Extent of axis `i` (1 for axes past the rank).
        #[inline]
        pub fn dim(&self, i: usize) -> usize {
            self.dims.get(i).copied().unwrap_or(1)
        }

        #[inline]
        pub fn dims(&self) -> &[usize] {
            &self.dims
        }

        /// Per-axis strides, in elements.
        #[inline]
        pub fn strides(&self) -> &[isize] {
            &self.strides
        }

        #[inline]
        pub fn order(&self) -> MemoryOrder {
            self.order
        }

        /// Kind of the elements behind the pointer.
        #[inline]
        pub fn element_type(&self) -> ElementType {
            T::TYPE
        }

        /// Number of elements described.
        #[inline]
        pub fn len(&self) -> usize {
            element_count(&self.dims)
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Address of the first element.
        #[inline]
        pub fn as_ptr(&self) -> *const T {
            self.buf.as_ptr()
        }

        /// The backing memory in linear order.
        #[inline]
        pub fn as_slice(&self) -> &[T] {
            &*self.buf
        }

        /// Check this buffer's layout against what an operation requires.
        ///
        /// Decided by the order tag (shape/stride consistency already held at
        /// construction); a square buffer's shape alone carries no signal.
        pub fn validate(&self, required: MemoryOrder) -> Result<(), LayoutError> {
            if self.order != required {
                return Err(LayoutError::WrongMemoryOrder {
                    required,
                    actual: self.order,
                });
            }
            Ok(())
        }

        /// Element at a multi-index, or None when out of bounds or the index
        /// rank disagrees.
        pub fn get(&self, index: &[usize]) -> Option<&T> {
            let offset = offset_checked(&self.dims, &self.strides, index)?;
            Some(&self.buf[offset])
        }
    };
}

impl<'a, T: Element> ArrayView<'a, T> {
    /// View a packed slice as `dims` in the given order.
    pub fn from_slice(
        buf: &'a [T],
        dims: &[usize],
        order: MemoryOrder,
    ) -> Result<Self, LayoutError> {
        let (dims, strides) = checked_parts(buf.len(), dims, order)?;
        Ok(Self {
            buf,
            dims,
            strides,
            order,
        })
    }

    /// View a slice with explicit strides. The strides must be exactly the
    /// packed pattern for `order`; anything else is a layout error.
    pub fn with_strides(
        buf: &'a [T],
        dims: &[usize],
        strides: &[isize],
        order: MemoryOrder,
    ) -> Result<Self, LayoutError> {
        let (dims, _) = checked_parts(buf.len(), dims, order)?;
        let strides = checked_strides(&dims, strides, order)?;
        Ok(Self {
            buf,
            dims,
            strides,
            order,
        })
    }

    pub(crate) fn from_parts(buf: &'a [T], dims: Dims, strides: Strides, order: MemoryOrder) -> Self {
        debug_assert!(matches_order(&dims, &strides, order));
        Self {
            buf,
            dims,
            strides,
            order,
        }
    }

    view_accessors!();

    /// The same memory with reversed axes. For rank >= 2 this flips the
    /// order tag: a transposed column-major buffer is a row-major one.
    pub fn transposed(mut self) -> Self {
        self.dims.reverse();
        self.strides.reverse();
        if self.ndim() >= 2 {
            self.order = self.order.transposed();
        }
        self
    }
}

impl<'a, T: Element> ArrayViewMut<'a, T> {
    /// View a packed mutable slice as `dims` in the given order.
    pub fn from_slice(
        buf: &'a mut [T],
        dims: &[usize],
        order: MemoryOrder,
    ) -> Result<Self, LayoutError> {
        let (dims, strides) = checked_parts(buf.len(), dims, order)?;
        Ok(Self {
            buf,
            dims,
            strides,
            order,
        })
    }

    /// View a mutable slice with explicit strides (packed pattern only).
    pub fn with_strides(
        buf: &'a mut [T],
        dims: &[usize],
        strides: &[isize],
        order: MemoryOrder,
    ) -> Result<Self, LayoutError> {
        let (dims, _) = checked_parts(buf.len(), dims, order)?;
        let strides = checked_strides(&dims, strides, order)?;
        Ok(Self {
            buf,
            dims,
            strides,
            order,
        })
    }

    /// Describe foreign memory.
    ///
    /// # Safety
    /// `data` must be non-null, aligned, point to at least the product of
    /// `dims` elements valid for reads and writes, be exclusively borrowed
    /// for `'a`, and outlive the view. This is the entry point the FFI
    /// surfaces use.
    pub unsafe fn from_raw_parts(
        data: *mut T,
        dims: &[usize],
        order: MemoryOrder,
    ) -> Result<Self, LayoutError> {
        let dims = check_dims(dims)?;
        let len = element_count(&dims);
        let buf = std::slice::from_raw_parts_mut(data, len);
        let strides = order.contiguous_strides(&dims);
        Ok(Self {
            buf,
            dims,
            strides,
            order,
        })
    }

    pub(crate) fn from_parts(
        buf: &'a mut [T],
        dims: Dims,
        strides: Strides,
        order: MemoryOrder,
    ) -> Self {
        debug_assert!(matches_order(&dims, &strides, order));
        Self {
            buf,
            dims,
            strides,
            order,
        }
    }

    view_accessors!();

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut *self.buf
    }

    /// Mutable element at a multi-index.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let offset = offset_checked(&self.dims, &self.strides, index)?;
        Some(&mut self.buf[offset])
    }

    /// Reborrow as a shared view.
    pub fn as_view(&self) -> ArrayView<'_, T> {
        ArrayView::from_parts(
            &*self.buf,
            self.dims.clone(),
            self.strides.clone(),
            self.order,
        )
    }

    /// The same memory with reversed axes (flips the order tag for
    /// rank >= 2).
    pub fn transposed(mut self) -> Self {
        self.dims.reverse();
        self.strides.reverse();
        if self.ndim() >= 2 {
            self.order = self.order.transposed();
        }
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_slice_computes_strides_for_the_order() {
        let buf = [0f64; 12];
        let v = ArrayView::from_slice(&buf, &[3, 4], MemoryOrder::ColumnMajor).unwrap();
        assert_eq!(v.strides(), &[1, 3]);
        let v = ArrayView::from_slice(&buf, &[3, 4], MemoryOrder::RowMajor).unwrap();
        assert_eq!(v.strides(), &[4, 1]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let buf = [0f64; 10];
        let err = ArrayView::from_slice(&buf, &[3, 4], MemoryOrder::ColumnMajor).unwrap_err();
        assert_eq!(
            err,
            LayoutError::BufferSizeMismatch {
                expected: 12,
                actual: 10
            }
        );
    }

    #[test]
    fn explicit_strides_must_match_the_tag() {
        let buf = [0f64; 12];
        assert!(ArrayView::with_strides(&buf, &[3, 4], &[1, 3], MemoryOrder::ColumnMajor).is_ok());
        let err = ArrayView::with_strides(&buf, &[3, 4], &[4, 1], MemoryOrder::ColumnMajor)
            .unwrap_err();
        assert!(matches!(err, LayoutError::StrideMismatch { .. }));
    }

    #[test]
    fn validate_checks_the_order_tag() {
        let buf = [0f64; 6];
        let v = ArrayView::from_slice(&buf, &[2, 3], MemoryOrder::RowMajor).unwrap();
        assert_eq!(
            v.validate(MemoryOrder::ColumnMajor),
            Err(LayoutError::WrongMemoryOrder {
                required: MemoryOrder::ColumnMajor,
                actual: MemoryOrder::RowMajor,
            })
        );
        assert_eq!(v.validate(MemoryOrder::RowMajor), Ok(()));
    }

    #[test]
    fn strided_indexing_respects_the_order() {
        // Column-major 2x3: memory is [a d b e c f] for
        //   a b c
        //   d e f
        let buf = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let v = ArrayView::from_slice(&buf, &[2, 3], MemoryOrder::ColumnMajor).unwrap();
        assert_eq!(v.get(&[0, 0]), Some(&1.0));
        assert_eq!(v.get(&[1, 0]), Some(&4.0));
        assert_eq!(v.get(&[0, 2]), Some(&3.0));
        assert_eq!(v.get(&[1, 2]), Some(&6.0));
        assert_eq!(v.get(&[2, 0]), None);
        assert_eq!(v.get(&[0, 0, 0]), None);
    }

    #[test]
    fn transposing_flips_the_order_tag() {
        let buf = [0f64; 6];
        let v = ArrayView::from_slice(&buf, &[2, 3], MemoryOrder::ColumnMajor).unwrap();
        let t = v.transposed();
        assert_eq!(t.dims(), &[3, 2]);
        assert_eq!(t.order(), MemoryOrder::RowMajor);
        // Same element addresses through swapped indices.
        assert_eq!(t.strides(), &[2, 1]);
    }

    #[test]
    fn transposing_rank_one_keeps_the_tag() {
        let buf = [0f64; 5];
        let v = ArrayView::from_slice(&buf, &[5], MemoryOrder::ColumnMajor).unwrap();
        assert_eq!(v.transposed().order(), MemoryOrder::ColumnMajor);
    }

    #[test]
    fn mutation_goes_through_strides() {
        let mut buf = [0i32; 6];
        let mut v = ArrayViewMut::from_slice(&mut buf, &[2, 3], MemoryOrder::ColumnMajor).unwrap();
        *v.get_mut(&[1, 2]).unwrap() = 9;
        assert_eq!(buf[5], 9);
    }
}
