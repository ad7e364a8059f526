// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cache keys for shaping results and glyph images.

use text_primitives::{Direction, Language, Script};

use crate::fixed::F26Dot6;
use crate::style::TextStyle;

/// Identifies a shaping result: the text plus every style field that affects shaping.
///
/// Sizes are compared in 26.6 fixed point and settings by their canonical strings, so keys are
/// stable across equal-but-differently-built styles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapingCacheKey {
    text: Box<str>,
    direction: Direction,
    size: F26Dot6,
    language: Language,
    script: Option<Script>,
    variations: Box<str>,
    features: Box<str>,
}

impl ShapingCacheKey {
    /// Derives the key for shaping `text` with `style`.
    pub fn new(text: &str, style: &TextStyle) -> Self {
        Self {
            text: text.into(),
            direction: style.direction,
            size: style.size_key(),
            language: style.language,
            script: style.script,
            variations: style.variations_key().into_boxed_str(),
            features: style.features_key().into_boxed_str(),
        }
    }

    /// The text this key was derived from.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Identifies a rendered glyph image within one size.
///
/// Sub-pixel offsets and variation settings both change the rendered pixels, so each distinct
/// combination is a separate entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GlyphImageCacheKey {
    /// Glyph index within the font.
    pub glyph_id: u32,
    /// Horizontal sub-pixel offset.
    pub x_offset: F26Dot6,
    /// Vertical sub-pixel offset.
    pub y_offset: F26Dot6,
    /// Canonical variation settings, as returned by [`TextStyle::variations_key`].
    pub variations: Box<str>,
}

impl GlyphImageCacheKey {
    /// Creates a key for `glyph_id` drawn at the given sub-pixel offset with the variations of
    /// `style`.
    pub fn new(glyph_id: u32, x_offset: F26Dot6, y_offset: F26Dot6, style: &TextStyle) -> Self {
        Self {
            glyph_id,
            x_offset,
            y_offset,
            variations: style.variations_key().into_boxed_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_primitives::Tag;

    fn base_style() -> TextStyle {
        let mut style = TextStyle::new(24.0)
            .with_language(Language::parse("en").unwrap())
            .with_script(Script::LATIN);
        style.set_feature(Tag::from_bytes(*b"liga"), 1);
        style.set_variation(Tag::from_bytes(*b"wght"), 400.0);
        style
    }

    #[test]
    fn equal_inputs_give_equal_keys() {
        let a = ShapingCacheKey::new("hello", &base_style());
        let b = ShapingCacheKey::new("hello", &base_style());
        assert_eq!(a, b);
        assert_eq!(a.text(), "hello");
    }

    #[test]
    fn every_field_distinguishes_keys() {
        let base = ShapingCacheKey::new("hello", &base_style());
        let variants: [fn(&mut TextStyle); 7] = [
            |s| s.size = 24.5,
            |s| s.direction = Direction::RightToLeft,
            |s| s.language = Language::parse("fr").unwrap(),
            |s| s.script = Some(Script::CYRILLIC),
            |s| s.set_feature(Tag::from_bytes(*b"liga"), 0),
            |s| s.set_feature(Tag::from_bytes(*b"smcp"), 1),
            |s| s.set_variation(Tag::from_bytes(*b"wght"), 700.0),
        ];
        for (i, change) in variants.into_iter().enumerate() {
            let mut style = base_style();
            change(&mut style);
            assert_ne!(
                ShapingCacheKey::new("hello", &style),
                base,
                "style change {i} should produce a distinct key"
            );
        }
        assert_ne!(ShapingCacheKey::new("hellO", &base_style()), base);
    }

    #[test]
    fn unprintable_tags_give_distinct_keys() {
        let mut a = TextStyle::new(24.0);
        a.set_feature(Tag::from_bytes(*b"\xffabc"), 1);
        let mut b = TextStyle::new(24.0);
        b.set_feature(Tag::from_bytes(*b"\xfeabc"), 1);
        assert_ne!(ShapingCacheKey::new("x", &a), ShapingCacheKey::new("x", &b));

        let mut a = TextStyle::new(24.0);
        a.set_variation(Tag::from_u32(0xff61_6263), 1.0);
        let mut b = TextStyle::new(24.0);
        b.set_variation(Tag::from_u32(0xfe61_6263), 1.0);
        assert_ne!(
            GlyphImageCacheKey::new(1, F26Dot6::ZERO, F26Dot6::ZERO, &a),
            GlyphImageCacheKey::new(1, F26Dot6::ZERO, F26Dot6::ZERO, &b)
        );
    }

    #[test]
    fn sizes_within_fixed_point_precision_share_a_key() {
        let mut style = base_style();
        style.size = 24.0 + 1.0e-6;
        assert_eq!(
            ShapingCacheKey::new("hello", &style),
            ShapingCacheKey::new("hello", &base_style())
        );
    }

    #[test]
    fn glyph_image_keys() {
        let style = base_style();
        let half = F26Dot6::from_bits(32);
        let key = GlyphImageCacheKey::new(7, half, F26Dot6::ZERO, &style);
        assert_eq!(&*key.variations, "wght=400");
        assert_ne!(key, GlyphImageCacheKey::new(7, F26Dot6::ZERO, F26Dot6::ZERO, &style));

        let mut bold = style.clone();
        bold.set_variation(Tag::from_bytes(*b"wght"), 700.0);
        assert_ne!(key, GlyphImageCacheKey::new(7, half, F26Dot6::ZERO, &bold));
    }
}
