// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shaping pipeline: turns a styled run of text into positioned, scaled glyph outlines.

use kurbo::{Affine, BezPath, PathEl, Point, Rect};

use crate::fixed::F26Dot6;
use crate::font::{FontResource, GlyphData, GlyphId, GlyphOutline};
use crate::segment::segment;
use crate::shaper::{ShapeInput, ShapedGlyph, ShapedOutput, Shaper};
use crate::style::TextStyle;

/// The immutable result of shaping a run of text.
#[derive(Clone, Debug)]
pub struct ShapedText {
    outputs: Vec<ShapedOutput>,
    glyphs: Vec<Glyph>,
    source_id: u64,
}

impl ShapedText {
    /// The shaper outputs, one per sub-run, in visual order.
    pub fn outputs(&self) -> &[ShapedOutput] {
        &self.outputs
    }

    /// All glyphs, sub-run by sub-run.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Returns `true` if there are no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The shaper's record for `glyph`, with its advances and offsets.
    ///
    /// # Panics
    ///
    /// If `glyph` doesn't belong to this result.
    pub fn shaped_glyph(&self, glyph: &Glyph) -> &ShapedGlyph {
        &self.outputs[glyph.output_index].glyphs[glyph.glyph_index]
    }

    pub(crate) fn source_id(&self) -> u64 {
        self.source_id
    }
}

/// A shaped glyph with its outline scaled to layout units.
///
/// The outline uses the render coordinate system: y points down, with the origin on the
/// baseline at the glyph's pen position.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    /// Glyph index within the font.
    pub glyph_id: GlyphId,
    /// Byte offset of the start of the glyph's cluster in the text.
    pub start_index: usize,
    /// Byte offset one past the end of the glyph's cluster.
    pub end_index: usize,
    /// The scaled outline. Empty for glyphs without vector data.
    pub path: BezPath,
    /// The bounding box of the outline's control points, [`Rect::ZERO`] for an empty outline.
    pub bounds: Rect,
    /// Index of the [`ShapedOutput`] this glyph came from.
    pub output_index: usize,
    /// Index of the glyph within its output.
    pub glyph_index: usize,
}

/// A glyph whose cluster has been mapped but whose outline is still in font units.
struct UnscaledGlyph {
    glyph_id: GlyphId,
    start_index: usize,
    end_index: usize,
    outline: Option<GlyphOutline>,
    output_index: usize,
    glyph_index: usize,
}

/// The part of the pipeline that needs the font and shaper.
///
/// Applies the style's variations, segments the text, shapes every sub-run, maps clusters to
/// byte ranges and extracts outlines.
pub(crate) struct Shaped {
    outputs: Vec<ShapedOutput>,
    glyphs: Vec<UnscaledGlyph>,
    units_per_em: u16,
}

impl Shaped {
    pub(crate) fn new<F, S>(font: &mut F, shaper: &mut S, text: &str, style: &TextStyle) -> Self
    where
        F: FontResource,
        S: Shaper<F>,
    {
        font.set_variations(style.variations());
        let font = &*font;

        let chars: Vec<char> = text.chars().collect();
        let mut segments = segment(text, &chars, style);
        if style.direction.is_rtl() {
            segments.reverse();
        }

        let size = style.size_key();
        let outputs: Vec<ShapedOutput> = segments
            .iter()
            .map(|segment| {
                let input = ShapeInput {
                    text: &chars,
                    run_start: segment.start,
                    run_end: segment.end,
                    direction: segment.direction,
                    size,
                    script: segment.script,
                    language: style.language,
                    features: style.features(),
                };
                let mut output = shaper.shape(font, &input);
                output.adjust_baselines();
                output
            })
            .collect();

        let clusters = cluster_table(text);
        let units_per_em = font.units_per_em();
        let mut glyphs = Vec::with_capacity(outputs.iter().map(|o| o.glyphs.len()).sum());
        for (output_index, output) in outputs.iter().enumerate() {
            for (glyph_index, glyph) in output.glyphs.iter().enumerate() {
                let start_index = cluster_offset(&clusters, glyph.cluster_index);
                let end_index = cluster_offset(&clusters, glyph.cluster_index + glyph.rune_count);
                glyphs.push(UnscaledGlyph {
                    glyph_id: glyph.glyph_id,
                    start_index,
                    end_index,
                    outline: glyph_outline(font, output, glyph, units_per_em),
                    output_index,
                    glyph_index,
                });
            }
        }

        Self {
            outputs,
            glyphs,
            units_per_em,
        }
    }

    /// Number of shaped sub-runs.
    pub(crate) fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Number of glyphs across all outputs.
    pub(crate) fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Scales every outline to its output's size and computes bounds.
    pub(crate) fn finish(self, source_id: u64) -> ShapedText {
        let upem = f64::from(self.units_per_em.max(1));
        let outputs = self.outputs;
        let glyphs = self
            .glyphs
            .into_iter()
            .map(|glyph| {
                let scale = outputs[glyph.output_index].size.to_f64() / upem;
                let path = glyph
                    .outline
                    .map(|outline| scale_outline(outline.path, scale))
                    .unwrap_or_default();
                Glyph {
                    glyph_id: glyph.glyph_id,
                    start_index: glyph.start_index,
                    end_index: glyph.end_index,
                    bounds: control_bounds(&path),
                    path,
                    output_index: glyph.output_index,
                    glyph_index: glyph.glyph_index,
                }
            })
            .collect();
        ShapedText {
            outputs,
            glyphs,
            source_id,
        }
    }
}

/// Byte offsets of every scalar of `text`, followed by `text.len()`.
fn cluster_table(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(core::iter::once(text.len()))
        .collect()
}

fn cluster_offset(table: &[usize], index: usize) -> usize {
    match table.get(index) {
        Some(&offset) => offset,
        None => panic!(
            "cluster index {index} is out of range for text of {} scalars",
            table.len() - 1
        ),
    }
}

fn glyph_outline<F: FontResource>(
    font: &F,
    output: &ShapedOutput,
    glyph: &ShapedGlyph,
    units_per_em: u16,
) -> Option<GlyphOutline> {
    match font.glyph_data(glyph.glyph_id)? {
        GlyphData::Outline(mut outline) => {
            if output.direction.is_sideways() && output.size != F26Dot6::ZERO {
                let y_offset =
                    -glyph.y_offset.to_f64() / output.size.to_f64() * f64::from(units_per_em);
                outline.sideways(y_offset);
            }
            Some(outline)
        }
        GlyphData::Svg(svg) => Some(svg.outline),
        GlyphData::Bitmap(bitmap) => bitmap.outline,
    }
}

/// Scales a font-unit outline to layout units, flipping y to point down.
fn scale_outline(mut path: BezPath, scale: f64) -> BezPath {
    path.apply_affine(Affine::scale_non_uniform(scale, -scale));
    path
}

fn control_bounds(path: &BezPath) -> Rect {
    let mut bounds: Option<Rect> = None;
    let mut add = |p: Point| {
        bounds = Some(match bounds {
            Some(rect) => rect.union_pt(p),
            None => Rect::from_points(p, p),
        });
    };
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => add(p),
            PathEl::QuadTo(p1, p2) => {
                add(p1);
                add(p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                add(p1);
                add(p2);
                add(p3);
            }
            PathEl::ClosePath => {}
        }
    }
    bounds.unwrap_or(Rect::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestFont, TestShaper};
    use text_primitives::Direction;

    fn shape(text: &str, style: &TextStyle) -> ShapedText {
        let mut font = TestFont::new();
        let mut shaper = TestShaper::new();
        Shaped::new(&mut font, &mut shaper, text, style).finish(0)
    }

    #[test]
    fn clusters_cover_the_text() {
        let text = "aé漢b";
        let shaped = shape(text, &TextStyle::new(10.0));
        let spans: Vec<_> = shaped
            .glyphs()
            .iter()
            .map(|g| (g.start_index, g.end_index))
            .collect();
        assert_eq!(spans, [(0, 1), (1, 3), (3, 6), (6, 7)]);
    }

    #[test]
    fn scaling_flips_y() {
        let shaped = shape("a", &TextStyle::new(10.0));
        let glyph = &shaped.glyphs()[0];
        // The test font's squares span 0..=500 in a 1000 unit em.
        assert_eq!(glyph.bounds, Rect::new(0.0, -5.0, 5.0, 0.0));
        assert!(glyph.bounds.y0 < 0.0);
    }

    #[test]
    fn empty_paths_have_zero_bounds() {
        let path = BezPath::new();
        assert_eq!(control_bounds(&path), Rect::ZERO);
    }

    #[test]
    fn control_points_count_towards_bounds() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((5.0, 10.0), (10.0, 0.0));
        path.close_path();
        assert_eq!(control_bounds(&path), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn rtl_reverses_sub_runs() {
        let ltr = shape("aя", &TextStyle::new(10.0));
        let rtl = shape("aя", &TextStyle::new(10.0).with_direction(Direction::RightToLeft));
        let scripts = |s: &ShapedText| s.outputs().iter().map(|o| o.run_start).collect::<Vec<_>>();
        assert_eq!(scripts(&ltr), [0, 1]);
        assert_eq!(scripts(&rtl), [1, 0]);
        assert_eq!(rtl.glyphs()[0].start_index, 1);
    }

    #[test]
    #[should_panic(expected = "cluster index")]
    fn out_of_range_clusters_panic() {
        cluster_offset(&cluster_table("ab"), 3);
    }

    #[test]
    fn empty_text_has_no_output() {
        let shaped = shape("", &TextStyle::default());
        assert!(shaped.is_empty());
        assert!(shaped.outputs().is_empty());
    }
}
