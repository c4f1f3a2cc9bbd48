use crate::dims::MemoryOrder;
use crate::element::Element;
use crate::error::LayoutError;
use crate::view::ArrayViewMut;

/// The memory order the natively-compiled transforms address memory with.
/// Callers holding row-major buffers must re-order them first; the bridge
/// reports the mismatch instead of silently misreading the data.
pub const NATIVE_ORDER: MemoryOrder = MemoryOrder::ColumnMajor;

/// Apply `f` to every element of a 2-D native-order buffer, in place.
///
/// All validation happens before the first store, so a rejected buffer is
/// left byte-for-byte unchanged.
pub(crate) fn map_in_place_2d<T: Element>(
    view: &mut ArrayViewMut<'_, T>,
    f: impl Fn(T) -> T,
) -> Result<(), LayoutError> {
    if view.ndim() != 2 {
        return Err(LayoutError::RankMismatch {
            expected: 2,
            actual: view.ndim(),
        });
    }
    view.validate(NATIVE_ORDER)?;

    let rows = view.dim(0);
    let cols = view.dim(1);
    let s0 = view.strides()[0];
    let s1 = view.strides()[1];
    let data = view.as_mut_ptr();

    // Column-major: walk axis 0 innermost. Addresses come from the strides,
    // not from an assumed flat layout.
    for j in 0..cols {
        let col = j as isize * s1;
        for i in 0..rows {
            // SAFETY: i < dims[0], j < dims[1], and the strides were checked
            // against the extents at construction, so every offset lands
            // inside the view's backing slice.
            unsafe {
                let p = data.offset(col + i as isize * s0);
                p.write(f(p.read()));
            }
        }
    }
    Ok(())
}

/// Double every element of a 2-D column-major buffer in place.
///
/// The caller keeps ownership of the memory; the view is borrowed for the
/// duration of this one call. Fails with
/// [WrongMemoryOrder](LayoutError::WrongMemoryOrder) for a row-major (or
/// transposed) buffer and [RankMismatch](LayoutError::RankMismatch) for any
/// rank other than 2, in both cases before touching a single element.
pub fn doublify<T: Element>(view: &mut ArrayViewMut<'_, T>) -> Result<(), LayoutError> {
    map_in_place_2d(view, |x| x + x)
}
