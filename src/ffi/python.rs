use pyo3::buffer::PyBuffer;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::bridge;
use crate::dims::{MemoryOrder, MAX_NDIM};
use crate::error::LayoutError;
use crate::view::ArrayViewMut;

impl From<LayoutError> for PyErr {
    fn from(err: LayoutError) -> PyErr {
        match err {
            LayoutError::WrongMemoryOrder { .. } => {
                PyValueError::new_err("Array not Fortran contiguous. Try .copy('F')?")
            }
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Double every element of a 2-D Fortran-ordered f64 buffer in place.
///
/// Accepts anything exporting the buffer protocol (a NumPy array, a
/// memoryview). The buffer is mutated through the caller's own memory; no
/// copy is made.
#[pyfunction]
fn doublify(array: PyBuffer<f64>) -> PyResult<()> {
    if array.readonly() {
        return Err(PyValueError::new_err("Buffer is read-only."));
    }
    if array.dimensions() > MAX_NDIM {
        return Err(PyValueError::new_err("Array has too many dimensions."));
    }
    let order = if array.is_fortran_contiguous() {
        MemoryOrder::ColumnMajor
    } else if array.is_c_contiguous() {
        MemoryOrder::RowMajor
    } else {
        return Err(PyValueError::new_err("Array is not contiguous."));
    };

    let shape = array.shape().to_vec();
    // SAFETY: the PyBuffer holds the exporter alive (and its memory pinned)
    // until `array` drops at the end of this call; the GIL makes the borrow
    // exclusive for that duration.
    let mut view =
        unsafe { ArrayViewMut::from_raw_parts(array.buf_ptr() as *mut f64, &shape, order) }?;
    bridge::doublify(&mut view)?;
    Ok(())
}

#[pymodule]
fn highorder_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__doc__", "This module is implemented in Rust.")?;
    m.add_function(wrap_pyfunction!(doublify, m)?)?;
    Ok(())
}
