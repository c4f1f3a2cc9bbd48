use bytemuck::Zeroable;

/// Allocate a zero-filled boxed slice.
pub(crate) fn calloc<T: Zeroable>(size: usize) -> Box<[T]> {
    bytemuck::allocation::zeroed_slice_box(size)
}
