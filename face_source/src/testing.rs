// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic stand-ins for a font and a shaper.
//!
//! [`TestFont`] maps every scalar value to the glyph with the same id, drawing each as a square
//! half an em wide. [`TestShaper`] emits one glyph per scalar, with optional ligatures. Both
//! count how often they are used through shared [`Counters`], which stay readable after the
//! font and shaper have been moved into a [`FaceSource`](crate::FaceSource).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hashbrown::HashMap;
use kurbo::BezPath;
use parking_lot::Mutex;
use text_primitives::{Direction, FontVariation};

use crate::fixed::F26Dot6;
use crate::font::{
    FontMetrics, FontResource, FontStyle, GlyphData, GlyphId, GlyphOutline, Metadata,
};
use crate::shaper::{LineBounds, ShapeInput, ShapedGlyph, ShapedOutput, Shaper};

/// Units per em of [`TestFont`].
pub const TEST_UNITS_PER_EM: u16 = 1000;

/// Width and height of every [`TestFont`] glyph, in font units.
pub const TEST_GLYPH_SIZE: f64 = 500.0;

/// Usage counts shared between a test font, a test shaper and the test that made them.
#[derive(Debug, Default)]
pub struct Counters {
    shape_calls: AtomicUsize,
    glyph_data_calls: AtomicUsize,
    applied_variations: Mutex<Vec<Vec<FontVariation>>>,
    glyph_reads: Mutex<Vec<(GlyphId, Vec<FontVariation>)>>,
}

impl Counters {
    /// Number of runs shaped.
    pub fn shape_calls(&self) -> usize {
        self.shape_calls.load(Ordering::SeqCst)
    }

    /// Number of glyph data lookups.
    pub fn glyph_data_calls(&self) -> usize {
        self.glyph_data_calls.load(Ordering::SeqCst)
    }

    /// Every variation configuration applied to the font, in order.
    pub fn applied_variations(&self) -> Vec<Vec<FontVariation>> {
        self.applied_variations.lock().clone()
    }

    /// Every glyph data lookup, in order, with the variations the font had at the time.
    pub fn glyph_reads(&self) -> Vec<(GlyphId, Vec<FontVariation>)> {
        self.glyph_reads.lock().clone()
    }
}

/// A font with one square glyph per scalar value.
///
/// Glyph zero has no data. Other glyphs can be given specific data with
/// [`TestFont::set_glyph_data`].
#[derive(Debug)]
pub struct TestFont {
    counters: Arc<Counters>,
    overrides: HashMap<GlyphId, Option<GlyphData>>,
    variations: Vec<FontVariation>,
}

impl Default for TestFont {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFont {
    /// Creates a test font with its own counters.
    pub fn new() -> Self {
        Self::with_counters(Arc::default())
    }

    /// Creates a test font that records into `counters`.
    pub fn with_counters(counters: Arc<Counters>) -> Self {
        Self {
            counters,
            overrides: HashMap::new(),
            variations: Vec::new(),
        }
    }

    /// The counters this font records into.
    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }

    /// Replaces the data of one glyph. `None` makes the glyph missing.
    pub fn set_glyph_data(&mut self, glyph_id: GlyphId, data: Option<GlyphData>) {
        self.overrides.insert(glyph_id, data);
    }

    /// The currently applied variations.
    pub fn variations(&self) -> &[FontVariation] {
        &self.variations
    }

    /// The outline every glyph without an override has.
    pub fn square() -> GlyphOutline {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((TEST_GLYPH_SIZE, 0.0));
        path.line_to((TEST_GLYPH_SIZE, TEST_GLYPH_SIZE));
        path.line_to((0.0, TEST_GLYPH_SIZE));
        path.close_path();
        GlyphOutline { path }
    }
}

impl FontResource for TestFont {
    fn units_per_em(&self) -> u16 {
        TEST_UNITS_PER_EM
    }

    fn set_variations(&mut self, variations: &[FontVariation]) {
        self.variations = variations.to_vec();
        self.counters
            .applied_variations
            .lock()
            .push(variations.to_vec());
    }

    fn glyph_data(&self, glyph_id: GlyphId) -> Option<GlyphData> {
        self.counters.glyph_data_calls.fetch_add(1, Ordering::SeqCst);
        self.counters
            .glyph_reads
            .lock()
            .push((glyph_id, self.variations.clone()));
        if let Some(data) = self.overrides.get(&glyph_id) {
            return data.clone();
        }
        (glyph_id != 0).then(|| GlyphData::Outline(Self::square()))
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            units_per_em: TEST_UNITS_PER_EM,
            ascent: 800.0,
            descent: -200.0,
            line_gap: 0.0,
            vertical_ascent: Some(500.0),
            vertical_descent: Some(-500.0),
        }
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            family: "Test Sans".into(),
            style: FontStyle::Normal,
            weight: 400.0,
            stretch: 1.0,
        }
    }
}

/// A shaper that emits one glyph per scalar, with the scalar's value as glyph id.
///
/// Every glyph advances by half an em along the direction of the run. Glyphs of right to left
/// runs come out in reverse text order.
#[derive(Debug, Default)]
pub struct TestShaper {
    counters: Arc<Counters>,
    ligatures: Vec<([char; 2], GlyphId)>,
    delay: Option<Duration>,
}

impl TestShaper {
    /// Creates a test shaper with its own counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a test shaper that records into `counters`.
    pub fn with_counters(counters: Arc<Counters>) -> Self {
        Self {
            counters,
            ..Self::default()
        }
    }

    /// The counters this shaper records into.
    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }

    /// Shapes the pair `[first, second]` as the single glyph `glyph_id`.
    #[must_use]
    pub fn with_ligature(mut self, pair: [char; 2], glyph_id: GlyphId) -> Self {
        self.ligatures.push((pair, glyph_id));
        self
    }

    /// Sleeps for `delay` on every call, to widen races in concurrency tests.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn ligature(&self, pair: &[char]) -> Option<GlyphId> {
        self.ligatures
            .iter()
            .find(|(p, _)| p.as_slice() == pair)
            .map(|(_, id)| *id)
    }
}

impl<F: FontResource> Shaper<F> for TestShaper {
    fn shape(&mut self, font: &F, input: &ShapeInput<'_>) -> ShapedOutput {
        self.counters.shape_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let upem = f64::from(font.units_per_em().max(1));
        let scale = input.size.to_f64() / upem;
        let advance = F26Dot6::from_f64(TEST_GLYPH_SIZE * scale);
        let upright = input.direction.is_vertical() && !input.direction.is_sideways();

        let mut glyphs = Vec::with_capacity(input.run_end - input.run_start);
        let mut index = input.run_start;
        while index < input.run_end {
            let pair = input.text.get(index..(index + 2).min(input.run_end));
            let (glyph_id, rune_count) = match pair.and_then(|p| self.ligature(p)) {
                Some(id) => (id, 2),
                None => (u32::from(input.text[index]), 1),
            };
            let (x_advance, y_advance) = if upright {
                (F26Dot6::ZERO, -advance)
            } else {
                (advance, F26Dot6::ZERO)
            };
            glyphs.push(ShapedGlyph {
                glyph_id,
                cluster_index: index,
                rune_count,
                glyph_count: 1,
                x_advance,
                y_advance,
                x_offset: F26Dot6::ZERO,
                y_offset: F26Dot6::ZERO,
            });
            index += rune_count;
        }
        if input.direction.direction == Direction::RightToLeft {
            glyphs.reverse();
        }

        let metrics = font.metrics();
        let scaled = |units: f32| F26Dot6::from_f64(f64::from(units) * scale);
        ShapedOutput {
            advance: glyphs
                .iter()
                .fold(F26Dot6::ZERO, |sum, g| sum + g.x_advance - g.y_advance),
            glyphs,
            direction: input.direction,
            size: input.size,
            line_bounds: LineBounds {
                ascent: scaled(metrics.ascent),
                descent: scaled(metrics.descent),
                gap: scaled(metrics.line_gap),
            },
            run_start: input.run_start,
            run_end: input.run_end,
        }
    }
}
