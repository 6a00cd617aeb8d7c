//! 2-D Points

use crate::common::*;
use num_traits::{Num, Zero};
use std::fmt;

/// A 2-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

/// 2-D point containing `usize` values; used for grid resolutions.
pub type Point2u = Point2<usize>;

impl<T: Num> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Creates a new 2-D zero point.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero())
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Returns true if the point lies in the closed unit square [0,1]x[0,1].
    pub fn in_unit_square(&self) -> bool
    where
        T: PartialOrd + Copy,
    {
        let (zero, one) = (T::zero(), T::one());
        self.x >= zero && self.x <= one && self.y >= zero && self.y <= one
    }
}

impl Point2u {
    /// Returns the number of cells in a grid of this resolution, or `None` if
    /// the product overflows.
    pub fn area(&self) -> Option<usize> {
        self.x.checked_mul(self.y)
    }
}

impl<T: fmt::Display> fmt::Display for Point2<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
