// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Shaper`] backed by HarfRust.

use std::sync::Arc;

use text_primitives::{Direction, FontVariation, Language};

use super::skrifa::SkrifaFont;
use crate::fixed::F26Dot6;
use crate::font::FontResource;
use crate::shaper::{LineBounds, ShapeInput, ShapedGlyph, ShapedOutput, Shaper};

/// Identifies the font a [`harfrust::ShaperData`] was built for.
#[derive(Clone, Copy, PartialEq, Eq)]
struct FontKey {
    data: usize,
    index: u32,
}

impl FontKey {
    fn new(font: &SkrifaFont) -> Self {
        Self {
            data: Arc::as_ptr(font.data()).cast::<u8>() as usize,
            index: font.index(),
        }
    }
}

/// Shapes runs with HarfRust.
///
/// Shaping tables are parsed once per font and the variation instance is rebuilt only when the
/// font's variation settings change. The glyph buffer is reused between calls.
#[derive(Default)]
pub struct HarfrustShaper {
    data: Option<(FontKey, harfrust::ShaperData)>,
    instance: Option<(Vec<FontVariation>, harfrust::ShaperInstance)>,
    buffer: Option<harfrust::UnicodeBuffer>,
    features: Vec<harfrust::Feature>,
}

impl HarfrustShaper {
    /// Creates a shaper.
    pub fn new() -> Self {
        Self::default()
    }
}

impl core::fmt::Debug for HarfrustShaper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HarfrustShaper")
            .field("has_data", &self.data.is_some())
            .field("variations", &self.instance.as_ref().map(|(v, _)| v))
            .finish_non_exhaustive()
    }
}

impl Shaper<SkrifaFont> for HarfrustShaper {
    fn shape(&mut self, font: &SkrifaFont, input: &ShapeInput<'_>) -> ShapedOutput {
        let mut output = ShapedOutput {
            glyphs: Vec::new(),
            direction: input.direction,
            size: input.size,
            advance: F26Dot6::ZERO,
            line_bounds: line_bounds(font, input),
            run_start: input.run_start,
            run_end: input.run_end,
        };
        let Ok(font_ref) = harfrust::FontRef::from_index(font.data(), font.index()) else {
            return output;
        };

        let key = FontKey::new(font);
        if self.data.as_ref().map(|(k, _)| *k) != Some(key) {
            self.data = Some((key, harfrust::ShaperData::new(&font_ref)));
            self.instance = None;
        }
        if self.instance.as_ref().map(|(v, _)| v.as_slice()) != Some(font.variations()) {
            let variations = font.variations().iter().map(|v| harfrust::Variation {
                tag: harfrust::Tag::from_u32(v.tag.to_u32()),
                value: v.value,
            });
            self.instance = Some((
                font.variations().to_vec(),
                harfrust::ShaperInstance::from_variations(&font_ref, variations),
            ));
        }
        let (Some((_, data)), Some((_, instance))) = (&self.data, &self.instance) else {
            return output;
        };

        let shaper = data
            .shaper(&font_ref)
            .instance(Some(instance))
            .point_size(Some(input.size.to_f32()))
            .build();

        let mut buffer = self
            .buffer
            .take()
            .unwrap_or_else(harfrust::UnicodeBuffer::new);
        buffer.clear();
        buffer.reserve(input.run_end - input.run_start);
        for (offset, &ch) in input.run().iter().enumerate() {
            // Clusters index the whole text, not the run.
            let cluster = u32::try_from(input.run_start + offset).unwrap_or(u32::MAX);
            buffer.add(ch, cluster);
        }
        let upright = input.direction.is_vertical() && !input.direction.is_sideways();
        buffer.set_direction(match input.direction.direction {
            Direction::RightToLeft => harfrust::Direction::RightToLeft,
            Direction::TopToBottom if upright => harfrust::Direction::TopToBottom,
            _ => harfrust::Direction::LeftToRight,
        });
        if let Some(script) =
            harfrust::Script::from_iso15924_tag(harfrust::Tag::new(&input.script.to_bytes()))
        {
            buffer.set_script(script);
        }
        if input.language != Language::UND {
            if let Ok(language) = input.language.as_str().parse::<harfrust::Language>() {
                buffer.set_language(language);
            }
        }

        self.features.clear();
        self.features.extend(input.features.iter().map(|feature| {
            harfrust::Feature::new(
                harfrust::Tag::from_u32(feature.tag.to_u32()),
                u32::from(feature.value),
                ..,
            )
        }));

        let glyph_buffer = shaper.shape(buffer, &self.features);
        let scale = input.size.to_f32() / f32::from(font.units_per_em());
        let to_layout = |units: i32| F26Dot6::from_f32(units as f32 * scale);

        let infos = glyph_buffer.glyph_infos();
        let positions = glyph_buffer.glyph_positions();
        let clusters: Vec<usize> = infos.iter().map(|info| info.cluster as usize).collect();
        let bounds = ClusterBounds::new(&clusters, input.run_end);
        output.glyphs.reserve(infos.len());
        for ((info, pos), &cluster) in infos.iter().zip(positions).zip(&clusters) {
            let (cluster_end, glyph_count) = bounds.span(cluster);
            let glyph = ShapedGlyph {
                glyph_id: info.glyph_id,
                cluster_index: cluster,
                rune_count: cluster_end - cluster,
                glyph_count,
                x_advance: to_layout(pos.x_advance),
                y_advance: to_layout(pos.y_advance),
                x_offset: to_layout(pos.x_offset),
                y_offset: to_layout(pos.y_offset),
            };
            output.advance += if upright {
                -glyph.y_advance
            } else {
                glyph.x_advance
            };
            output.glyphs.push(glyph);
        }

        self.buffer = Some(glyph_buffer.clear());
        output
    }
}

/// The distinct cluster starts of a run, sorted, with the number of glyphs in each.
struct ClusterBounds {
    /// Cluster starts followed by the run end.
    starts: Vec<usize>,
    counts: Vec<usize>,
}

impl ClusterBounds {
    fn new(clusters: &[usize], run_end: usize) -> Self {
        let mut starts = clusters.to_vec();
        starts.sort_unstable();
        starts.dedup();
        let mut counts = vec![0; starts.len()];
        for cluster in clusters {
            if let Ok(i) = starts.binary_search(cluster) {
                counts[i] += 1;
            }
        }
        starts.push(run_end);
        Self { starts, counts }
    }

    /// The end of the cluster starting at `cluster`, and how many glyphs share it.
    fn span(&self, cluster: usize) -> (usize, usize) {
        match self.starts.binary_search(&cluster) {
            Ok(i) => (
                self.starts.get(i + 1).copied().unwrap_or(cluster),
                self.counts.get(i).copied().unwrap_or_default(),
            ),
            Err(_) => (cluster, 0),
        }
    }
}

fn line_bounds(font: &SkrifaFont, input: &ShapeInput<'_>) -> LineBounds {
    let metrics = font.metrics();
    let scale = input.size.to_f32() / f32::from(metrics.units_per_em.max(1));
    let (ascent, descent) = if input.direction.is_vertical() && !input.direction.is_sideways() {
        (
            metrics.vertical_ascent.unwrap_or(metrics.ascent),
            metrics.vertical_descent.unwrap_or(metrics.descent),
        )
    } else {
        (metrics.ascent, metrics.descent)
    };
    LineBounds {
        ascent: F26Dot6::from_f32(ascent * scale),
        descent: F26Dot6::from_f32(descent * scale),
        gap: F26Dot6::from_f32(metrics.line_gap * scale),
    }
}
