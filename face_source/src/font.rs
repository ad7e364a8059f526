// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font capability consumed by the shaping pipeline.

use kurbo::{BezPath, PathEl, Point};
use text_primitives::FontVariation;

/// Glyph index within a font.
pub type GlyphId = u32;

/// A parsed font with a single mutable variation configuration.
///
/// Implementations own immutable table data plus the currently applied variation settings.
/// [`FontResource::set_variations`] affects every following call until it is called again.
pub trait FontResource {
    /// Design units per em. Must be positive.
    fn units_per_em(&self) -> u16;

    /// Applies a variation configuration, replacing the previous one. Axes the font doesn't
    /// have are ignored.
    fn set_variations(&mut self, variations: &[FontVariation]);

    /// Returns the vector representation of a glyph under the current variations, in font
    /// units with the y axis pointing up. `None` if the font has no data for the glyph.
    fn glyph_data(&self, glyph_id: GlyphId) -> Option<GlyphData>;

    /// Global metrics in font units for the default instance.
    fn metrics(&self) -> FontMetrics;

    /// Descriptive data about the font.
    fn metadata(&self) -> Metadata;
}

/// The vector data a font provides for one glyph. Exactly one representation applies.
#[derive(Clone, Debug)]
pub enum GlyphData {
    /// A filled outline from `glyf`, `CFF` or `CFF2`.
    Outline(GlyphOutline),
    /// A glyph with an SVG document, along with its outline fallback.
    Svg(GlyphSvg),
    /// An embedded bitmap, possibly with a vector outline.
    Bitmap(GlyphBitmap),
}

/// A glyph outline in font units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphOutline {
    /// The outline path.
    pub path: BezPath,
}

impl GlyphOutline {
    /// Rotates the outline for sideways rendering in vertical text.
    ///
    /// Each point `(x, y)` becomes `(y, y_offset - x)`: a quarter turn clockwise, then moved down
    /// the vertical axis by `y_offset` font units.
    pub fn sideways(&mut self, y_offset: f64) {
        let rotate = |p: Point| Point::new(p.y, y_offset - p.x);
        for el in self.path.elements_mut() {
            *el = match *el {
                PathEl::MoveTo(p) => PathEl::MoveTo(rotate(p)),
                PathEl::LineTo(p) => PathEl::LineTo(rotate(p)),
                PathEl::QuadTo(p1, p2) => PathEl::QuadTo(rotate(p1), rotate(p2)),
                PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(rotate(p1), rotate(p2), rotate(p3)),
                PathEl::ClosePath => PathEl::ClosePath,
            };
        }
    }
}

/// An SVG glyph.
#[derive(Clone, Debug, Default)]
pub struct GlyphSvg {
    /// The outline that approximates the SVG rendering.
    pub outline: GlyphOutline,
}

/// An embedded bitmap glyph.
#[derive(Clone, Debug, Default)]
pub struct GlyphBitmap {
    /// Horizontal pixels per em of the strike the bitmap comes from.
    pub ppem_x: f32,
    /// Vertical pixels per em of the strike the bitmap comes from.
    pub ppem_y: f32,
    /// A vector outline for the same glyph, if the font also has one.
    pub outline: Option<GlyphOutline>,
}

/// Global font metrics in font units, y axis pointing up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Design units per em.
    pub units_per_em: u16,
    /// Distance from the baseline to the top of the line. Positive.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line. Usually negative.
    pub descent: f32,
    /// Recommended extra space between lines.
    pub line_gap: f32,
    /// Vertical ascent from `vhea`, if present.
    pub vertical_ascent: Option<f32>,
    /// Vertical descent from `vhea`, if present.
    pub vertical_descent: Option<f32>,
}

impl FontMetrics {
    /// Scales the metrics to `size` layout units per em.
    ///
    /// The result uses positive values for both ascent and descent. Fonts that lack horizontal
    /// ascent and descent fall back to their vertical ones.
    pub fn scale(&self, size: f32) -> ScaledMetrics {
        let scale = size / f32::from(self.units_per_em.max(1));
        let (ascent, descent) = if self.ascent != 0.0 || self.descent != 0.0 {
            (self.ascent, self.descent)
        } else {
            (
                self.vertical_ascent.unwrap_or_default(),
                self.vertical_descent.unwrap_or_default(),
            )
        };
        ScaledMetrics {
            ascent: ascent * scale,
            descent: -descent * scale,
            line_gap: self.line_gap * scale,
        }
    }
}

/// Font metrics scaled to a size, in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaledMetrics {
    /// Distance above the baseline. Positive.
    pub ascent: f32,
    /// Distance below the baseline. Positive.
    pub descent: f32,
    /// Recommended extra space between lines.
    pub line_gap: f32,
}

impl ScaledMetrics {
    /// `ascent + descent`.
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// The slant of a font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
    /// Oblique.
    Oblique,
}

/// Descriptive data about a font.
#[derive(Clone, Debug, PartialEq)]
pub struct Metadata {
    /// The family name, or an empty string if the font has none.
    pub family: String,
    /// The slant.
    pub style: FontStyle,
    /// Weight on the CSS scale, 400 being regular.
    pub weight: f32,
    /// Width as a ratio of the normal width, 1.0 being normal.
    pub stretch: f32,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            family: String::new(),
            style: FontStyle::Normal,
            weight: 400.0,
            stretch: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sideways_rotates_clockwise() {
        let mut path = BezPath::new();
        path.move_to((10.0, 0.0));
        path.line_to((0.0, 20.0));
        let mut outline = GlyphOutline { path };
        outline.sideways(5.0);
        assert_eq!(
            outline.path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, -5.0)),
                PathEl::LineTo(Point::new(20.0, 5.0)),
            ]
        );
    }

    #[test]
    fn scaled_metrics_fall_back_to_vertical() {
        let metrics = FontMetrics {
            units_per_em: 1000,
            vertical_ascent: Some(500.0),
            vertical_descent: Some(-500.0),
            ..FontMetrics::default()
        };
        let scaled = metrics.scale(20.0);
        assert_eq!(scaled.ascent, 10.0);
        assert_eq!(scaled.descent, 10.0);
        assert_eq!(scaled.line_height(), 20.0);
    }
}
