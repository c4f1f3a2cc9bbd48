//! Whole-array reductions, the free-function tail of the native array
//! header.

use crate::array::Array;
use crate::element::{Element, FloatElement};

/// Sum of all elements.
pub fn sum<T: Element>(a: &Array<T>) -> T {
    a.as_slice().iter().fold(T::ZERO, |acc, &x| acc + x)
}

/// Product of all elements.
pub fn prod<T: Element>(a: &Array<T>) -> T {
    a.as_slice().iter().fold(T::ONE, |acc, &x| acc * x)
}

/// Largest element, or None for an empty array.
pub fn max<T: Element>(a: &Array<T>) -> Option<T> {
    a.as_slice()
        .iter()
        .copied()
        .reduce(|x, y| if T::total_cmp(x, y).is_lt() { y } else { x })
}

/// Smallest element, or None for an empty array.
pub fn min<T: Element>(a: &Array<T>) -> Option<T> {
    a.as_slice()
        .iter()
        .copied()
        .reduce(|x, y| if T::total_cmp(y, x).is_lt() { y } else { x })
}

/// Euclidean norm over the flat elements.
pub fn norm<T: FloatElement>(a: &Array<T>) -> T {
    a.as_slice()
        .iter()
        .fold(T::ZERO, |acc, &x| acc + x * x)
        .sqrt()
}

/// Largest absolute value.
pub fn infnorm<T: FloatElement>(a: &Array<T>) -> T {
    a.as_slice().iter().fold(T::ZERO, |acc, &x| {
        let v = x.abs();
        if T::total_cmp(v, acc).is_gt() {
            v
        } else {
            acc
        }
    })
}

/// Whether any element is NaN.
pub fn anynan<T: FloatElement>(a: &Array<T>) -> bool {
    a.as_slice().iter().any(|x| x.is_nan())
}

/// Sort the elements in memory order. NaNs sort after every finite value.
pub fn sort<T: Element>(a: &mut Array<T>) {
    a.as_slice_mut().sort_unstable_by(|x, y| T::total_cmp(*x, *y));
}
