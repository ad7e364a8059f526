// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style a run of text is shaped with.

use core::fmt::Write as _;

use smallvec::SmallVec;
use text_primitives::{Direction, FontFeature, FontVariation, Language, Script, Setting, Tag};

use crate::fixed::F26Dot6;

/// Size, direction, language, script, feature toggles and variation axes for shaping a run.
///
/// Feature and variation settings are kept sorted by tag with at most one entry per tag, so two
/// styles built by setting the same values in a different order compare equal and produce the
/// same cache keys.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in layout units per em. Must be positive when shaping.
    pub size: f32,
    /// Writing direction.
    pub direction: Direction,
    /// Language of the text.
    pub language: Language,
    /// Script to assume for characters that don't determine one themselves (punctuation, digits,
    /// combining marks at the start of the text). When `None`, the first script found in the
    /// text is used.
    pub script: Option<Script>,
    features: SmallVec<[FontFeature; 4]>,
    variations: SmallVec<[FontVariation; 4]>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl TextStyle {
    /// Creates a left-to-right style of the given size with no language, script, features or
    /// variations.
    pub fn new(size: f32) -> Self {
        Self {
            size,
            direction: Direction::LeftToRight,
            language: Language::UND,
            script: None,
            features: SmallVec::new(),
            variations: SmallVec::new(),
        }
    }

    /// Sets the writing direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the language.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets the fallback script.
    #[must_use]
    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }

    /// Sets the value of an OpenType feature, replacing any previous value for `tag`.
    pub fn set_feature(&mut self, tag: Tag, value: u16) {
        set_sorted(&mut self.features, Setting::new(tag, value));
    }

    /// Removes the setting for an OpenType feature.
    pub fn remove_feature(&mut self, tag: Tag) {
        self.features.retain(|f| f.tag != tag);
    }

    /// Sets the value of a variation axis, replacing any previous value for `tag`.
    ///
    /// `-0.0` is stored as `0.0`, since both are the same axis position.
    pub fn set_variation(&mut self, tag: Tag, value: f32) {
        let value = if value == 0.0 { 0.0 } else { value };
        set_sorted(&mut self.variations, Setting::new(tag, value));
    }

    /// Removes the setting for a variation axis.
    pub fn remove_variation(&mut self, tag: Tag) {
        self.variations.retain(|v| v.tag != tag);
    }

    /// Feature settings, sorted by tag.
    pub fn features(&self) -> &[FontFeature] {
        &self.features
    }

    /// Variation settings, sorted by tag.
    pub fn variations(&self) -> &[FontVariation] {
        &self.variations
    }

    /// The size in 26.6 fixed point.
    pub fn size_key(&self) -> F26Dot6 {
        F26Dot6::from_f32(self.size)
    }

    /// The canonical form of the feature settings, e.g. `"kern=0,liga=1"`.
    pub fn features_key(&self) -> String {
        join_settings(&self.features)
    }

    /// The canonical form of the variation settings, e.g. `"wdth=75,wght=700"`.
    pub fn variations_key(&self) -> String {
        join_settings(&self.variations)
    }
}

fn set_sorted<T>(settings: &mut SmallVec<[Setting<T>; 4]>, setting: Setting<T>) {
    match settings.binary_search_by(|s| s.tag.cmp(&setting.tag)) {
        Ok(index) => settings[index] = setting,
        Err(index) => settings.insert(index, setting),
    }
}

fn join_settings<T: core::fmt::Display>(settings: &[Setting<T>]) -> String {
    let mut out = String::new();
    for (i, setting) in settings.iter().enumerate() {
        if i != 0 {
            out.push(',');
        }
        // Writing to a `String` cannot fail.
        let _ = write!(out, "{setting}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const WGHT: Tag = Tag::from_bytes(*b"wght");
    const WDTH: Tag = Tag::from_bytes(*b"wdth");
    const LIGA: Tag = Tag::from_bytes(*b"liga");
    const KERN: Tag = Tag::from_bytes(*b"kern");

    #[test]
    fn settings_are_order_independent() {
        let mut a = TextStyle::new(12.0);
        a.set_variation(WGHT, 700.0);
        a.set_variation(WDTH, 75.0);

        let mut b = TextStyle::new(12.0);
        b.set_variation(WDTH, 75.0);
        b.set_variation(WGHT, 700.0);

        assert_eq!(a, b);
        assert_eq!(a.variations_key(), "wdth=75,wght=700");
        assert_eq!(a.variations_key(), b.variations_key());
    }

    #[test]
    fn setting_a_tag_twice_replaces_it() {
        let mut style = TextStyle::default();
        style.set_feature(LIGA, 1);
        style.set_feature(KERN, 0);
        style.set_feature(LIGA, 0);
        assert_eq!(style.features().len(), 2);
        assert_eq!(style.features_key(), "kern=0,liga=0");
    }

    #[test]
    fn remove_settings() {
        let mut style = TextStyle::default();
        style.set_feature(LIGA, 1);
        style.set_variation(WGHT, 400.0);
        style.remove_feature(LIGA);
        style.remove_variation(WGHT);
        assert!(style.features().is_empty());
        assert_eq!(style.variations_key(), "");
    }

    #[test]
    fn negative_zero_variation_is_zero() {
        let mut negative = TextStyle::default();
        negative.set_variation(WGHT, -0.0);
        let mut positive = TextStyle::default();
        positive.set_variation(WGHT, 0.0);
        assert_eq!(negative.variations_key(), "wght=0");
        assert_eq!(negative.variations_key(), positive.variations_key());
        assert!(negative.variations()[0].value.is_sign_positive());
    }
}
