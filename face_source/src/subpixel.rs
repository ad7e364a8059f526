// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sub-pixel positioning of glyph images.
//!
//! Small text is rendered at several fractional offsets so glyphs can be placed more precisely
//! than a whole pixel; large text gets by with fewer variants. The number of variants per axis
//! is chosen from the line height.

use crate::fixed::F26Dot6;
use crate::font::ScaledMetrics;

/// Line heights below this get [`MAX_VARIATIONS`] variants per axis.
pub const SMALL_LINE_HEIGHT: f32 = 20.0;
/// Line heights below this get half of [`MAX_VARIATIONS`].
pub const MEDIUM_LINE_HEIGHT: f32 = 40.0;
/// Line heights below this get a quarter of [`MAX_VARIATIONS`]; anything larger gets one.
pub const LARGE_LINE_HEIGHT: f32 = 80.0;
/// The largest number of sub-pixel variants per axis.
pub const MAX_VARIATIONS: i32 = 8;

/// Returns the number of sub-pixel offsets a glyph image is rendered at, per axis.
pub fn glyph_variation_count(metrics: &ScaledMetrics) -> i32 {
    let height = metrics.line_height();
    if height < SMALL_LINE_HEIGHT {
        MAX_VARIATIONS
    } else if height < MEDIUM_LINE_HEIGHT {
        MAX_VARIATIONS / 2
    } else if height < LARGE_LINE_HEIGHT {
        MAX_VARIATIONS / 4
    } else {
        1
    }
}

/// Snaps a fractional offset down to the nearest multiple of `1 / count` pixels.
pub fn adjust_granularity(offset: F26Dot6, count: i32) -> F26Dot6 {
    let step = F26Dot6::ONE.to_bits() / count.clamp(1, F26Dot6::ONE.to_bits());
    F26Dot6::from_bits(offset.to_bits().div_euclid(step) * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(height: f32) -> ScaledMetrics {
        ScaledMetrics {
            ascent: height * 0.75,
            descent: height * 0.25,
            line_gap: 0.0,
        }
    }

    #[test]
    fn variation_count_shrinks_with_size() {
        assert_eq!(glyph_variation_count(&metrics(12.0)), 8);
        assert_eq!(glyph_variation_count(&metrics(20.0)), 4);
        assert_eq!(glyph_variation_count(&metrics(39.0)), 4);
        assert_eq!(glyph_variation_count(&metrics(40.0)), 2);
        assert_eq!(glyph_variation_count(&metrics(80.0)), 1);
        assert_eq!(glyph_variation_count(&metrics(200.0)), 1);
    }

    #[test]
    fn granularity_snaps_down() {
        // Eighths of a pixel are 8 units of 26.6.
        assert_eq!(adjust_granularity(F26Dot6::from_bits(23), 8).to_bits(), 16);
        assert_eq!(adjust_granularity(F26Dot6::from_bits(31), 2).to_bits(), 0);
        assert_eq!(adjust_granularity(F26Dot6::from_bits(33), 2).to_bits(), 32);
        assert_eq!(adjust_granularity(F26Dot6::from_bits(63), 1).to_bits(), 0);
        assert_eq!(adjust_granularity(F26Dot6::from_bits(-3), 4).to_bits(), -16);
    }
}
