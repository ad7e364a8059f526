// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shaping capability consumed by the pipeline, and its input and output records.

use text_primitives::{Direction, FontFeature, Language, Script};

use crate::fixed::F26Dot6;
use crate::font::GlyphId;

/// Maps a homogeneous run of text to positioned glyphs.
///
/// Calls are independent from the pipeline's point of view; any state a shaper keeps between
/// calls (buffers, plans) is its own concern.
pub trait Shaper<F> {
    /// Shapes `input.text[input.run_start..input.run_end]` with `font`.
    ///
    /// Glyph cluster indices are indices into `input.text`, the whole text, not the run.
    fn shape(&mut self, font: &F, input: &ShapeInput<'_>) -> ShapedOutput;
}

/// The direction a run is shaped in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeDirection {
    /// The progression of glyphs.
    pub direction: Direction,
    /// For vertical text: glyphs are laid out horizontally and then rotated a quarter turn.
    pub sideways: bool,
}

impl ShapeDirection {
    /// Left to right, upright.
    pub const LTR: Self = Self::new(Direction::LeftToRight);

    /// Right to left, upright.
    pub const RTL: Self = Self::new(Direction::RightToLeft);

    /// Creates an upright direction.
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            sideways: false,
        }
    }

    /// Creates a vertical direction whose glyphs are rotated.
    pub const fn sideways() -> Self {
        Self {
            direction: Direction::TopToBottom,
            sideways: true,
        }
    }

    /// Returns `true` if glyphs are rotated for vertical text.
    pub const fn is_sideways(self) -> bool {
        self.sideways
    }

    /// Returns `true` for vertical text.
    pub const fn is_vertical(self) -> bool {
        self.direction.is_vertical()
    }
}

/// One homogeneous run of text to be shaped.
#[derive(Clone, Debug)]
pub struct ShapeInput<'a> {
    /// The whole text, as scalar values.
    pub text: &'a [char],
    /// First scalar of the run.
    pub run_start: usize,
    /// One past the last scalar of the run.
    pub run_end: usize,
    /// Shaping direction of the run.
    pub direction: ShapeDirection,
    /// Font size in layout units per em.
    pub size: F26Dot6,
    /// Script of the run.
    pub script: Script,
    /// Language of the run.
    pub language: Language,
    /// OpenType features to apply.
    pub features: &'a [FontFeature],
}

impl ShapeInput<'_> {
    /// The scalars of this run.
    pub fn run(&self) -> &[char] {
        &self.text[self.run_start..self.run_end]
    }
}

/// A glyph positioned by the shaper. Distances are in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Glyph index within the font.
    pub glyph_id: GlyphId,
    /// Index of the first scalar of this glyph's cluster in the whole text.
    pub cluster_index: usize,
    /// Number of scalars in the cluster.
    pub rune_count: usize,
    /// Number of glyphs in the cluster.
    pub glyph_count: usize,
    /// Horizontal advance.
    pub x_advance: F26Dot6,
    /// Vertical advance. Negative for top to bottom text, since y points up here.
    pub y_advance: F26Dot6,
    /// Horizontal offset from the pen position.
    pub x_offset: F26Dot6,
    /// Vertical offset from the pen position, y pointing up.
    pub y_offset: F26Dot6,
}

/// Ascent, descent and gap of a shaped line, in layout units. Descent is negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineBounds {
    /// Distance from the baseline to the top.
    pub ascent: F26Dot6,
    /// Distance from the baseline to the bottom, usually negative.
    pub descent: F26Dot6,
    /// Extra gap between lines.
    pub gap: F26Dot6,
}

/// The result of shaping one run.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedOutput {
    /// Glyphs in visual order.
    pub glyphs: Vec<ShapedGlyph>,
    /// Direction the run was shaped in.
    pub direction: ShapeDirection,
    /// Size the run was shaped at.
    pub size: F26Dot6,
    /// Sum of the glyph advances along the direction of progression.
    pub advance: F26Dot6,
    /// Extent of the run across the direction of progression.
    pub line_bounds: LineBounds,
    /// First scalar of the run in the whole text.
    pub run_start: usize,
    /// One past the last scalar of the run.
    pub run_end: usize,
}

impl ShapedOutput {
    /// Aligns the run on a common baseline for its line.
    ///
    /// A line here holds a single run. Horizontal and upright vertical runs are already aligned.
    /// Sideways runs in vertical text are centered on the vertical axis by moving every glyph
    /// across the line by half the run's ascent and descent.
    pub fn adjust_baselines(&mut self) {
        if !self.direction.is_sideways() {
            return;
        }
        let middle = F26Dot6::from_bits(
            (self.line_bounds.ascent.to_bits() + self.line_bounds.descent.to_bits()) / 2,
        );
        if middle == F26Dot6::ZERO {
            return;
        }
        for glyph in &mut self.glyphs {
            glyph.y_offset = glyph.y_offset - middle;
        }
        self.line_bounds.ascent = self.line_bounds.ascent - middle;
        self.line_bounds.descent = self.line_bounds.descent - middle;
    }
}
