#![allow(non_camel_case_types)]

use libc::{c_double, c_int, size_t};
use raw_parts::RawParts;

use crate::bridge;
use crate::dims::{MemoryOrder, MAX_NDIM};
use crate::error::LayoutError;
use crate::mem::calloc;
use crate::view::ArrayViewMut;

pub const HO_OK: c_int = 0;
pub const HO_ERR_NULL: c_int = 1;
pub const HO_ERR_WRONG_ORDER: c_int = 2;
pub const HO_ERR_RANK: c_int = 3;
pub const HO_ERR_LAYOUT: c_int = 4;

pub const HO_ORDER_COLUMN_MAJOR: c_int = 0;
pub const HO_ORDER_ROW_MAJOR: c_int = 1;

/// C-visible descriptor of an f64 buffer. Arrays made by
/// [ho_array_f64_create] own their data; a caller may also fill one in over
/// its own memory and only borrow it to [ho_array_f64_doublify].
#[repr(C)]
pub struct ho_array_f64 {
    ndim: c_int,
    dims: [size_t; MAX_NDIM],
    /// One of the HO_ORDER_* tags.
    order: c_int,
    data: *mut c_double,
}

impl Drop for ho_array_f64 {
    fn drop(&mut self) {
        let ndim = self.ndim.clamp(0, MAX_NDIM as c_int) as usize;
        let len = self.dims[..ndim].iter().product();
        drop_array_mut(&mut self.data, len);
    }
}

fn drop_boxed_mut<T>(ptr: &mut *mut T) {
    if ptr.is_null() {
        return;
    }
    let ptr = std::mem::replace(ptr, std::ptr::null_mut());
    let boxed = unsafe { Box::from_raw(ptr) };
    drop(boxed);
}

fn drop_array_mut<T>(ptr: &mut *mut T, len: usize) {
    if ptr.is_null() {
        return;
    }
    let ptr = std::mem::replace(ptr, std::ptr::null_mut());
    let raw_parts = RawParts {
        ptr,
        length: len,
        capacity: len,
    };
    unsafe { raw_parts.into_vec() };
}

fn status(err: LayoutError) -> c_int {
    match err {
        LayoutError::WrongMemoryOrder { .. } => HO_ERR_WRONG_ORDER,
        LayoutError::RankMismatch { .. } => HO_ERR_RANK,
        _ => HO_ERR_LAYOUT,
    }
}

/// Allocate a zero-filled column-major array. Returns NULL for a bad rank or
/// a NULL `dims` pointer.
#[no_mangle]
pub unsafe extern "C" fn ho_array_f64_create(
    ndim: c_int,
    dims: *const size_t,
) -> *mut ho_array_f64 {
    if ndim < 0 || ndim as usize > MAX_NDIM || (ndim > 0 && dims.is_null()) {
        return std::ptr::null_mut();
    }
    let ndim = ndim as usize;

    let mut dim_slots = [0 as size_t; MAX_NDIM];
    for (i, slot) in dim_slots.iter_mut().enumerate().take(ndim) {
        *slot = *dims.add(i);
    }
    let len: usize = dim_slots[..ndim].iter().product();

    let buf: Box<[c_double]> = calloc(len);
    let RawParts {
        ptr,
        length,
        capacity,
    } = RawParts::from_vec(buf.into_vec());
    assert_eq!(length, capacity);

    Box::into_raw(Box::new(ho_array_f64 {
        ndim: ndim as c_int,
        dims: dim_slots,
        order: HO_ORDER_COLUMN_MAJOR,
        data: ptr,
    }))
}

/// Free an array made by [ho_array_f64_create], data included. NULL is a
/// no-op.
#[no_mangle]
pub unsafe extern "C" fn ho_array_f64_destroy(mut arr: *mut ho_array_f64) {
    drop_boxed_mut(&mut arr);
}

/// Address of the first element, or NULL.
#[no_mangle]
pub unsafe extern "C" fn ho_array_f64_data(arr: *mut ho_array_f64) -> *mut c_double {
    match arr.as_ref() {
        Some(a) => a.data,
        None => std::ptr::null_mut(),
    }
}

/// Element count.
#[no_mangle]
pub unsafe extern "C" fn ho_array_f64_size(arr: *const ho_array_f64) -> size_t {
    match arr.as_ref() {
        Some(a) => a.dims[..a.ndim as usize].iter().product(),
        None => 0,
    }
}

/// Double every element of a 2-D column-major array in place. Validation
/// runs before any element is written; on a nonzero status the data is
/// untouched.
#[no_mangle]
pub unsafe extern "C" fn ho_array_f64_doublify(arr: *mut ho_array_f64) -> c_int {
    let arr = match arr.as_mut() {
        Some(a) => a,
        None => return HO_ERR_NULL,
    };
    if arr.data.is_null() {
        return HO_ERR_NULL;
    }
    if arr.ndim < 0 || arr.ndim as usize > MAX_NDIM {
        return HO_ERR_RANK;
    }
    let order = match arr.order {
        HO_ORDER_COLUMN_MAJOR => MemoryOrder::ColumnMajor,
        HO_ORDER_ROW_MAJOR => MemoryOrder::RowMajor,
        _ => return HO_ERR_LAYOUT,
    };

    let dims = &arr.dims[..arr.ndim as usize];
    let mut view = match ArrayViewMut::from_raw_parts(arr.data, dims, order) {
        Ok(view) => view,
        Err(err) => return status(err),
    };
    match bridge::doublify(&mut view) {
        Ok(()) => HO_OK,
        Err(err) => status(err),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn create_doublify_destroy_roundtrip() {
        unsafe {
            let dims = [2 as size_t, 2];
            let arr = ho_array_f64_create(2, dims.as_ptr());
            assert!(!arr.is_null());
            assert_eq!(ho_array_f64_size(arr), 4);

            let data = ho_array_f64_data(arr);
            // Column-major [[1.1, 2.2], [3.3, 4.4]]
            for (i, v) in [1.1, 3.3, 2.2, 4.4].iter().enumerate() {
                *data.add(i) = *v;
            }

            assert_eq!(ho_array_f64_doublify(arr), HO_OK);
            assert_eq!(*data.add(0), 2.2);
            assert_eq!(*data.add(1), 6.6);
            assert_eq!(*data.add(2), 4.4);
            assert_eq!(*data.add(3), 8.8);

            ho_array_f64_destroy(arr);
        }
    }

    #[test]
    fn row_major_tag_is_rejected_without_mutation() {
        unsafe {
            // Caller-owned descriptor over caller-owned memory.
            let mut buf = [1.0f64, 2.0, 3.0, 4.0];
            let mut desc = ho_array_f64 {
                ndim: 2,
                dims: [2, 2, 0, 0, 0, 0],
                order: HO_ORDER_ROW_MAJOR,
                data: buf.as_mut_ptr(),
            };
            assert_eq!(ho_array_f64_doublify(&mut desc), HO_ERR_WRONG_ORDER);
            // Descriptor only borrows the stack buffer.
            desc.data = std::ptr::null_mut();
            assert_eq!(buf, [1.0, 2.0, 3.0, 4.0]);
        }
    }

    #[test]
    fn wrong_rank_is_an_error_code() {
        unsafe {
            let dims = [4 as size_t];
            let arr = ho_array_f64_create(1, dims.as_ptr());
            assert_eq!(ho_array_f64_doublify(arr), HO_ERR_RANK);
            ho_array_f64_destroy(arr);
        }
    }

    #[test]
    fn null_arguments_do_not_crash() {
        unsafe {
            assert_eq!(ho_array_f64_doublify(std::ptr::null_mut()), HO_ERR_NULL);
            assert!(ho_array_f64_data(std::ptr::null_mut()).is_null());
            assert_eq!(ho_array_f64_size(std::ptr::null()), 0);
            ho_array_f64_destroy(std::ptr::null_mut());
            assert!(ho_array_f64_create(7, std::ptr::null()).is_null());
        }
    }
}
