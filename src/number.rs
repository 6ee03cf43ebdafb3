// src/number.rs

//! Numeric abstraction shared by the stabilizer.
//!
//! The stabilizer is generic over its value type so it can run on targets
//! with or without an FPU. Floating point and signed fixed-point types both
//! satisfy [`Number`].

use core::ops::Neg;
use num_traits::{Bounded, FromPrimitive, Num};

/// Custom trait to encapsulate base number requirements.
pub trait Number: Num + Copy + PartialOrd + Bounded + FromPrimitive + Neg<Output = Self> {
    /// Converts a whole number, saturating at the largest representable
    /// value when it does not fit.
    fn saturating_from(value: u32) -> Self {
        Self::from_u32(value).unwrap_or_else(Self::max_value)
    }
}

impl<T> Number for T where
    T: Num + Copy + PartialOrd + Bounded + FromPrimitive + Neg<Output = T>
{
}

/// Bounds `value` to the symmetric range `[-limit, limit]`.
///
/// `limit` is expected to be non-negative.
///
/// Example Usage
/// ```
/// use camera_stabilization::bound;
///
/// assert_eq!(bound(1.5_f32, 1.0), 1.0);
/// assert_eq!(bound(-3.0_f32, 2.0), -2.0);
/// assert_eq!(bound(0.25_f32, 1.0), 0.25);
/// ```
pub fn bound<T: Number>(value: T, limit: T) -> T {
    if value > limit {
        limit
    } else if value < -limit {
        -limit
    } else {
        value
    }
}

/// Returns `true` when the magnitude of `value` is strictly greater than `limit`.
pub fn exceeds<T: Number>(value: T, limit: T) -> bool {
    value > limit || value < -limit
}
