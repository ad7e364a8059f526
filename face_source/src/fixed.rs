// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 26.6 fixed point numbers.

use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub};

/// A signed 26.6 fixed point number: 26 integer bits and 6 fractional bits.
///
/// Sizes, shaper positions and sub-pixel offsets are carried in this form so that values which
/// compare equal also hash equal, with no floating point representation noise.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct F26Dot6(i32);

impl F26Dot6 {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One, i.e. 64 in raw units.
    pub const ONE: Self = Self(64);

    /// The largest representable value. Conversions from larger floats saturate to it.
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a value from raw 26.6 bits.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the raw 26.6 bits.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a value from an integer.
    pub const fn from_i32(value: i32) -> Self {
        Self(value << 6)
    }

    /// Converts from `f32`, rounding to the nearest 1/64.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "layout values are far below the 26-bit integer range"
    )]
    pub fn from_f32(value: f32) -> Self {
        Self((value * 64.0).round() as i32)
    }

    /// Converts from `f64`, rounding to the nearest 1/64.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "layout values are far below the 26-bit integer range"
    )]
    pub fn from_f64(value: f64) -> Self {
        Self((value * 64.0).round() as i32)
    }

    /// Converts to `f32`.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 64.0
    }

    /// Converts to `f64`.
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 64.0
    }

    /// Returns the largest integral value less than or equal to `self`.
    pub const fn floor(self) -> Self {
        Self(self.0 & !63)
    }

    /// Returns the integer part, rounding towards negative infinity.
    pub const fn floor_int(self) -> i32 {
        self.0 >> 6
    }

    /// Returns the fractional part, always in `0..64` raw units.
    pub const fn fract(self) -> Self {
        Self(self.0 & 63)
    }
}

impl Add for F26Dot6 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for F26Dot6 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for F26Dot6 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for F26Dot6 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Debug for F26Dot6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F26Dot6({})", self.to_f64())
    }
}

impl fmt::Display for F26Dot6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_round_to_nearest() {
        assert_eq!(F26Dot6::from_f32(1.5).to_bits(), 96);
        assert_eq!(F26Dot6::from_f64(0.01).to_bits(), 1);
        assert_eq!(F26Dot6::from_f64(-2.25).to_bits(), -144);
        assert_eq!(F26Dot6::from_i32(3).to_f32(), 3.0);
    }

    #[test]
    fn floor_and_fract_split_negative_values() {
        let value = F26Dot6::from_f64(-1.25);
        assert_eq!(value.floor_int(), -2);
        assert_eq!(value.fract(), F26Dot6::from_f64(0.75));
        assert_eq!(value.floor() + value.fract(), value);
    }

    #[test]
    fn representation_noise_is_absorbed() {
        assert_eq!(F26Dot6::from_f64(0.1 + 0.2), F26Dot6::from_f64(0.3));
    }
}
