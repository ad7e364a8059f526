// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`FontResource`] backed by Skrifa.

use std::io::Read;
use std::sync::Arc;

use kurbo::BezPath;
use skrifa::instance::{Location, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::raw::{FileRef, TableProvider};
use skrifa::string::StringId;
use skrifa::{FontRef, GlyphId as SkrifaGlyphId, MetadataProvider};
use text_primitives::FontVariation;

use crate::error::LoadError;
use crate::font::{
    FontMetrics, FontResource, FontStyle, GlyphBitmap, GlyphData, GlyphId, GlyphOutline,
    GlyphSvg, Metadata,
};

/// A font from an OpenType file, with its currently applied variation settings.
///
/// The font data is shared, so loading the same bytes as several fonts (for example every
/// member of a collection) doesn't copy them.
#[derive(Clone)]
pub struct SkrifaFont {
    data: Arc<[u8]>,
    index: u32,
    units_per_em: u16,
    metrics: FontMetrics,
    variations: Vec<FontVariation>,
    location: Location,
}

impl SkrifaFont {
    /// Parses the font at `index` in `data`. For a single font file, `index` must be zero.
    pub fn new(data: Arc<[u8]>, index: u32) -> Result<Self, LoadError> {
        let count = font_count(&data)?;
        if index >= count {
            return Err(LoadError::IndexOutOfRange { index, count });
        }
        let font = FontRef::from_index(&data, index)?;
        let units_per_em = font
            .head()
            .map(|head| head.units_per_em())
            .map_err(|_| LoadError::MissingUnitsPerEm)?;
        if units_per_em == 0 {
            return Err(LoadError::MissingUnitsPerEm);
        }
        let metrics = read_metrics(&font, units_per_em);
        log::debug!(
            "loaded font {index} ({} bytes, {units_per_em} units per em)",
            data.len()
        );
        Ok(Self {
            data,
            index,
            units_per_em,
            metrics,
            variations: Vec::new(),
            location: Location::default(),
        })
    }

    /// Reads all of `reader` and parses the first font in it.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, LoadError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::new(data.into(), 0)
    }

    /// Parses every font in `data`. A single font file yields one font.
    pub fn collection(data: Arc<[u8]>) -> Result<Vec<Self>, LoadError> {
        let count = font_count(&data)?;
        if count == 0 {
            return Err(LoadError::EmptyCollection);
        }
        (0..count)
            .map(|index| Self::new(Arc::clone(&data), index))
            .collect()
    }

    /// The raw font file data.
    pub fn data(&self) -> &Arc<[u8]> {
        &self.data
    }

    /// The index of this font within its file.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The variation settings most recently applied with [`FontResource::set_variations`].
    pub fn variations(&self) -> &[FontVariation] {
        &self.variations
    }

    /// A Skrifa view of the font. Fails only if the data has changed since loading, which it
    /// can't.
    pub fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index).ok()
    }

    fn outline(&self, font: &FontRef<'_>, glyph_id: SkrifaGlyphId) -> Option<GlyphOutline> {
        let glyph = font.outline_glyphs().get(glyph_id)?;
        let mut pen = PathPen::default();
        let settings = DrawSettings::unhinted(Size::unscaled(), &self.location);
        match glyph.draw(settings, &mut pen) {
            Ok(_) => Some(GlyphOutline { path: pen.path }),
            Err(err) => {
                log::warn!("failed to draw outline for glyph {}: {err}", glyph_id.to_u32());
                Some(GlyphOutline::default())
            }
        }
    }
}

impl core::fmt::Debug for SkrifaFont {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkrifaFont")
            .field("len", &self.data.len())
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .field("variations", &self.variations)
            .finish_non_exhaustive()
    }
}

impl FontResource for SkrifaFont {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn set_variations(&mut self, variations: &[FontVariation]) {
        if self.variations == variations {
            return;
        }
        let Some(font) = self.font_ref() else {
            return;
        };
        let location = font.axes().location(
            variations
                .iter()
                .map(|v| (skrifa::Tag::new(&v.tag.to_bytes()), v.value)),
        );
        self.location = location;
        self.variations = variations.to_vec();
    }

    fn glyph_data(&self, glyph_id: GlyphId) -> Option<GlyphData> {
        let font = self.font_ref()?;
        let id = SkrifaGlyphId::new(glyph_id);

        let has_svg = font
            .svg()
            .ok()
            .and_then(|svg| svg.glyph_data(id).ok().flatten())
            .is_some();
        if has_svg {
            let outline = self.outline(&font, id).unwrap_or_default();
            return Some(GlyphData::Svg(GlyphSvg { outline }));
        }

        let strikes = font.bitmap_strikes();
        let ppem = Size::new(f32::from(self.units_per_em));
        if let Some(bitmap) = strikes.glyph_for_size(ppem, id) {
            return Some(GlyphData::Bitmap(GlyphBitmap {
                ppem_x: bitmap.ppem_x,
                ppem_y: bitmap.ppem_y,
                outline: self.outline(&font, id),
            }));
        }

        self.outline(&font, id).map(GlyphData::Outline)
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn metadata(&self) -> Metadata {
        let Some(font) = self.font_ref() else {
            return Metadata::default();
        };
        let family = font
            .localized_strings(StringId::FAMILY_NAME)
            .english_or_first()
            .map(|name| name.chars().collect())
            .unwrap_or_default();
        let attributes = font.attributes();
        let style = match attributes.style {
            skrifa::attribute::Style::Normal => FontStyle::Normal,
            skrifa::attribute::Style::Italic => FontStyle::Italic,
            skrifa::attribute::Style::Oblique(_) => FontStyle::Oblique,
        };
        Metadata {
            family,
            style,
            weight: attributes.weight.value(),
            stretch: attributes.stretch.ratio(),
        }
    }
}

/// Number of fonts in a file: the collection size, or one for a plain font.
fn font_count(data: &[u8]) -> Result<u32, LoadError> {
    Ok(match FileRef::new(data)? {
        FileRef::Font(_) => 1,
        FileRef::Collection(collection) => collection.len(),
    })
}

fn read_metrics(font: &FontRef<'_>, units_per_em: u16) -> FontMetrics {
    let metrics = font.metrics(Size::unscaled(), &Location::default());
    let (vertical_ascent, vertical_descent) = match font.vhea() {
        Ok(vhea) => (
            Some(f32::from(vhea.ascender().to_i16())),
            Some(f32::from(vhea.descender().to_i16())),
        ),
        Err(_) => (None, None),
    };
    FontMetrics {
        units_per_em,
        ascent: metrics.ascent,
        descent: metrics.descent,
        line_gap: metrics.leading,
        vertical_ascent,
        vertical_descent,
    }
}

/// Collects an outline into a [`BezPath`], in font units with y pointing up.
#[derive(Default)]
struct PathPen {
    path: BezPath,
}

impl OutlinePen for PathPen {
    #[inline]
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x, y));
    }

    #[inline]
    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x, y));
    }

    #[inline]
    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.quad_to((cx0, cy0), (x, y));
    }

    #[inline]
    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to((cx0, cy0), (cx1, cy1), (x, y));
    }

    #[inline]
    fn close(&mut self) {
        self.path.close_path();
    }
}
