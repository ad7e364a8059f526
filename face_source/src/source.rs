// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A font together with the caches that make repeated shaping and glyph rendering cheap.

use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hashbrown::HashMap;
use kurbo::Point;
use parking_lot::{Mutex, RwLock};

use crate::backend::harfrust::HarfrustShaper;
use crate::backend::skrifa::SkrifaFont;
use crate::cache::{CacheStats, KeyedCache};
use crate::error::LoadError;
use crate::fixed::F26Dot6;
use crate::font::{FontMetrics, FontResource, Metadata, ScaledMetrics};
use crate::key::{GlyphImageCacheKey, ShapingCacheKey};
use crate::shape::{Glyph, Shaped, ShapedText};
use crate::shaper::Shaper;
use crate::style::TextStyle;
use crate::subpixel::{adjust_granularity, glyph_variation_count};

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Cache sizes of a [`FaceSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceSourceConfig {
    /// Number of shaping results kept, across all sizes.
    pub shape_cache_capacity: usize,
    /// Number of glyph images kept per size, before multiplying by the number of sub-pixel
    /// variants for that size.
    pub glyph_image_base_capacity: usize,
}

impl Default for FaceSourceConfig {
    fn default() -> Self {
        Self {
            shape_cache_capacity: 512,
            glyph_image_base_capacity: 128,
        }
    }
}

/// The font and shaper. Only one run is shaped at a time, since applying a style's variations
/// changes the font for everything that follows.
struct Session<F, S> {
    font: F,
    shaper: S,
}

type ImageCache<I> = Arc<KeyedCache<GlyphImageCacheKey, I>>;

/// A glyph image placed at an integer pixel position.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedImage<I> {
    /// Index of the glyph in [`ShapedText::glyphs`].
    pub glyph_index: usize,
    /// Integer pixel position of the glyph origin.
    pub x: i32,
    /// Integer pixel position of the glyph origin, y pointing down.
    pub y: i32,
    /// The image.
    pub image: I,
}

/// One font with a shaping cache and per-size glyph image caches.
///
/// `I` is the type of rendered glyph images, which callers produce themselves in
/// [`FaceSource::glyph_image`]. A face source can be shared between threads by reference or in
/// an [`Arc`]. It is not [`Clone`]: every [`ShapedText`] it produces is tied to this instance.
pub struct FaceSource<I, F = SkrifaFont, S = HarfrustShaper> {
    id: u64,
    session: Mutex<Session<F, S>>,
    shape_cache: KeyedCache<ShapingCacheKey, Arc<ShapedText>>,
    image_caches: RwLock<HashMap<F26Dot6, ImageCache<I>>>,
    metadata: Metadata,
    metrics: FontMetrics,
    config: FaceSourceConfig,
}

impl<I: Clone> FaceSource<I> {
    /// Reads a font file from `reader` and loads its first font.
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        Ok(Self::new(SkrifaFont::from_reader(reader)?, HarfrustShaper::new()))
    }

    /// Loads the font at `index` in `data`.
    pub fn from_data(data: Arc<[u8]>, index: u32) -> Result<Self, LoadError> {
        Ok(Self::new(SkrifaFont::new(data, index)?, HarfrustShaper::new()))
    }

    /// Reads a font file or collection from `reader` and loads every font in it.
    pub fn from_collection(mut reader: impl Read) -> Result<Vec<Self>, LoadError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(SkrifaFont::collection(data.into())?
            .into_iter()
            .map(|font| Self::new(font, HarfrustShaper::new()))
            .collect())
    }
}

impl<I, F, S> FaceSource<I, F, S>
where
    I: Clone,
    F: FontResource,
    S: Shaper<F>,
{
    /// Creates a face source with the default cache sizes.
    pub fn new(font: F, shaper: S) -> Self {
        Self::with_config(font, shaper, FaceSourceConfig::default())
    }

    /// Creates a face source with the given cache sizes.
    pub fn with_config(font: F, shaper: S, config: FaceSourceConfig) -> Self {
        let metadata = font.metadata();
        let metrics = font.metrics();
        Self {
            id: NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed),
            session: Mutex::new(Session { font, shaper }),
            shape_cache: KeyedCache::new(config.shape_cache_capacity),
            image_caches: RwLock::new(HashMap::new()),
            metadata,
            metrics,
            config,
        }
    }

    /// Shapes `text` with `style`, or returns the result of an earlier identical call.
    ///
    /// Equal text and styles give the same [`Arc`]. Empty text gives an empty result.
    ///
    /// # Panics
    ///
    /// If `style.size` is not finite, or doesn't round to a positive 26.6 fixed point value below
    /// [`F26Dot6::MAX`]. Sizes are shaped at a precision of 1/64, so anything under 1/128 is
    /// rejected as zero.
    pub fn shape(&self, text: &str, style: &TextStyle) -> Arc<ShapedText> {
        let size = style.size_key();
        assert!(
            style.size.is_finite() && size > F26Dot6::ZERO && size < F26Dot6::MAX,
            "text size must be positive and finite and fit 26.6 fixed point, got {}",
            style.size
        );
        let key = ShapingCacheKey::new(text, style);
        self.shape_cache.get_or_create(key, || {
            let shaped = {
                let mut session = self.session.lock();
                let Session { font, shaper } = &mut *session;
                Shaped::new(font, shaper, text, style)
            };
            log::debug!(
                "shaped {} bytes into {} runs of {} glyphs at size {}",
                text.len(),
                shaped.output_count(),
                shaped.glyph_count(),
                size
            );
            (Arc::new(shaped.finish(self.id)), true)
        })
    }

    /// Returns the image for a glyph, rendering it with `rasterize` if it isn't cached.
    ///
    /// `rasterize` returns the image and whether it may be cached. Images are cached per size,
    /// and a size's cache is created the first time the size is used.
    pub fn glyph_image(
        &self,
        style: &TextStyle,
        key: GlyphImageCacheKey,
        rasterize: impl FnOnce() -> (I, bool),
    ) -> I {
        self.image_cache(style).get_or_create(key, rasterize)
    }

    /// Returns an image for every glyph of `shaped`, placed along a pen that starts at `origin`.
    ///
    /// Each glyph position is split into a whole pixel and a fractional offset, snapped to the
    /// sub-pixel granularity of the size. `rasterize` is called with the glyph and that
    /// offset for images that aren't cached.
    ///
    /// # Panics
    ///
    /// If `shaped` was produced by a different face source.
    pub fn glyph_images(
        &self,
        shaped: &ShapedText,
        style: &TextStyle,
        origin: Point,
        mut rasterize: impl FnMut(&Glyph, F26Dot6, F26Dot6) -> (I, bool),
    ) -> Vec<PositionedImage<I>> {
        assert_eq!(
            shaped.source_id(),
            self.id,
            "the shaped text was produced by a different face source"
        );
        let count = self.glyph_variation_count(style);
        let cache = self.image_cache(style);
        let mut pen_x = F26Dot6::from_f64(origin.x);
        let mut pen_y = F26Dot6::from_f64(origin.y);

        let mut images = Vec::with_capacity(shaped.glyphs().len());
        for (glyph_index, glyph) in shaped.glyphs().iter().enumerate() {
            let shaped_glyph = shaped.shaped_glyph(glyph);
            let sideways = shaped.outputs()[glyph.output_index].direction.is_sideways();
            let (x, y) = if sideways {
                (pen_x, pen_y + shaped_glyph.x_offset)
            } else {
                (pen_x + shaped_glyph.x_offset, pen_y - shaped_glyph.y_offset)
            };
            let fract_x = adjust_granularity(x.fract(), count);
            let fract_y = adjust_granularity(y.fract(), count);
            let key = GlyphImageCacheKey::new(glyph.glyph_id, fract_x, fract_y, style);
            let image = cache.get_or_create(key, || rasterize(glyph, fract_x, fract_y));
            images.push(PositionedImage {
                glyph_index,
                x: x.floor_int(),
                y: y.floor_int(),
                image,
            });

            if sideways {
                pen_y += shaped_glyph.x_advance;
            } else {
                pen_x += shaped_glyph.x_advance;
                pen_y = pen_y - shaped_glyph.y_advance;
            }
        }
        images
    }

    /// Descriptive data about the font, read once when the face source was created.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The font's metrics scaled to `size`.
    pub fn metrics(&self, size: f32) -> ScaledMetrics {
        self.metrics.scale(size)
    }

    /// Number of sub-pixel offsets per axis glyph images of `style` are rendered at.
    pub fn glyph_variation_count(&self, style: &TextStyle) -> i32 {
        glyph_variation_count(&self.metrics(style.size))
    }

    /// The cache sizes this face source was created with.
    pub fn config(&self) -> FaceSourceConfig {
        self.config
    }

    /// Occupancy and hit statistics of the shaping cache.
    pub fn shape_cache_stats(&self) -> CacheStats {
        self.shape_cache.stats()
    }

    /// Number of sizes that have a glyph image cache.
    pub fn glyph_image_cache_count(&self) -> usize {
        self.image_caches.read().len()
    }

    /// Occupancy and hit statistics of the glyph image cache for `size`, if it exists.
    pub fn glyph_image_cache_stats(&self, size: f32) -> Option<CacheStats> {
        self.image_caches
            .read()
            .get(&F26Dot6::from_f32(size))
            .map(|cache| cache.stats())
    }

    fn image_cache(&self, style: &TextStyle) -> ImageCache<I> {
        let size = style.size_key();
        if let Some(cache) = self.image_caches.read().get(&size) {
            return Arc::clone(cache);
        }
        let mut caches = self.image_caches.write();
        let cache = caches.entry(size).or_insert_with(|| {
            let capacity = self
                .config
                .glyph_image_base_capacity
                .saturating_mul(usize::try_from(self.glyph_variation_count(style)).unwrap_or(1));
            log::debug!("created glyph image cache for size {size} with capacity {capacity}");
            Arc::new(KeyedCache::new(capacity))
        });
        Arc::clone(cache)
    }
}

impl<I, F, S> core::fmt::Debug for FaceSource<I, F, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FaceSource")
            .field("id", &self.id)
            .field("metadata", &self.metadata)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
