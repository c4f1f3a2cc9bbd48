use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use bytemuck::Pod;

/// Fixed-width element kinds understood by the bridge.
///
/// Mirrors the type table the native bridge publishes to foreign callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementType {
    U8,
    I32,
    I64,
    U64,
    F32,
    F64,
}

impl ElementType {
    /// Size of one element, in bytes.
    pub const fn size(self) -> usize {
        match self {
            ElementType::U8 => 1,
            ElementType::I32 | ElementType::F32 => 4,
            ElementType::I64 | ElementType::U64 | ElementType::F64 => 8,
        }
    }

    /// Python struct-module format character for this kind.
    pub const fn format(self) -> char {
        match self {
            ElementType::U8 => 'B',
            ElementType::I32 => 'i',
            ElementType::I64 => 'l',
            ElementType::U64 => 'L',
            ElementType::F32 => 'f',
            ElementType::F64 => 'd',
        }
    }
}

/// A numeric type that can live in a bridged buffer.
///
/// `Pod` makes strided raw-pointer access and zeroed allocation sound; the
/// arithmetic bounds cover the whole-array operators.
pub trait Element:
    Pod
    + Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + 'static
{
    const TYPE: ElementType;
    const ZERO: Self;
    const ONE: Self;

    /// Total order over elements. For floats this is IEEE totalOrder, so NaNs
    /// sort after every finite value instead of poisoning comparisons.
    fn total_cmp(self, other: Self) -> Ordering;
}

macro_rules! element_int {
    ($ty:ty, $tag:ident) => {
        impl Element for $ty {
            const TYPE: ElementType = ElementType::$tag;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline(always)]
            fn total_cmp(self, other: Self) -> Ordering {
                Ord::cmp(&self, &other)
            }
        }
    };
}

macro_rules! element_float {
    ($ty:ty, $tag:ident) => {
        impl Element for $ty {
            const TYPE: ElementType = ElementType::$tag;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline(always)]
            fn total_cmp(self, other: Self) -> Ordering {
                <$ty>::total_cmp(&self, &other)
            }
        }

        impl FloatElement for $ty {
            #[inline(always)]
            fn abs(self) -> Self {
                <$ty>::abs(self)
            }

            #[inline(always)]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }

            #[inline(always)]
            fn is_nan(self) -> bool {
                <$ty>::is_nan(self)
            }
        }
    };
}

element_int!(u8, U8);
element_int!(i32, I32);
element_int!(i64, I64);
element_int!(u64, U64);
element_float!(f32, F32);
element_float!(f64, F64);

/// Floating-point elements, for the norm-style reductions.
pub trait FloatElement: Element {
    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn is_nan(self) -> bool;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn format_characters_match_the_bridge_table() {
        assert_eq!(ElementType::F32.format(), 'f');
        assert_eq!(ElementType::F64.format(), 'd');
        assert_eq!(ElementType::I32.format(), 'i');
        assert_eq!(ElementType::I64.format(), 'l');
        assert_eq!(ElementType::U64.format(), 'L');
    }

    #[test]
    fn element_sizes() {
        assert_eq!(ElementType::U8.size(), 1);
        assert_eq!(ElementType::F32.size(), 4);
        assert_eq!(<f64 as Element>::TYPE.size(), std::mem::size_of::<f64>());
    }

    #[test]
    fn nan_sorts_last() {
        let mut v = [f64::NAN, 1.0, -2.0];
        v.sort_unstable_by(|a, b| Element::total_cmp(*a, *b));
        assert_eq!(v[0], -2.0);
        assert_eq!(v[1], 1.0);
        assert!(v[2].is_nan());
    }
}
