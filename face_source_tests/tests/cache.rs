// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaping cache behavior through the face source.

use std::sync::Arc;

use face_source::{FaceSourceConfig, KeyedCache, TextStyle};
use text_primitives::{Direction, Language, Script, Tag};

use crate::util::TestEnv;

fn styled() -> TextStyle {
    let mut style = TextStyle::new(18.0)
        .with_language(Language::parse("en-US").unwrap())
        .with_script(Script::LATIN);
    style.set_feature(Tag::from_bytes(*b"liga"), 1);
    style.set_variation(Tag::from_bytes(*b"wght"), 500.0);
    style
}

#[test]
fn cache_repeated_shape_returns_same_result() {
    let env = TestEnv::new();
    let style = styled();

    let first = env.source.shape("hello", &style);
    let shape_calls = env.counters.shape_calls();
    let glyph_calls = env.counters.glyph_data_calls();
    assert_eq!(shape_calls, 1);
    assert_eq!(glyph_calls, 5);

    let second = env.source.shape("hello", &style.clone());
    assert!(Arc::ptr_eq(&first, &second), "expected the cached result");
    assert_eq!(env.counters.shape_calls(), shape_calls, "shaper ran again");
    assert_eq!(env.counters.glyph_data_calls(), glyph_calls, "outlines were read again");

    let stats = env.source.shape_cache_stats();
    assert_eq!((stats.hits, stats.misses, stats.len), (1, 1, 1));
}

#[test]
fn cache_equivalent_styles_built_in_any_order_share_results() {
    let env = TestEnv::new();
    let mut a = TextStyle::new(14.0);
    a.set_variation(Tag::from_bytes(*b"wght"), 700.0);
    a.set_variation(Tag::from_bytes(*b"wdth"), 80.0);
    let mut b = TextStyle::new(14.0);
    b.set_variation(Tag::from_bytes(*b"wdth"), 80.0);
    b.set_variation(Tag::from_bytes(*b"wght"), 700.0);

    let first = env.source.shape("abc", &a);
    let second = env.source.shape("abc", &b);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn cache_every_style_field_is_part_of_the_key() {
    let env = TestEnv::new();
    let base = styled();
    let original = env.source.shape("hello", &base);

    let changes: [fn(&mut TextStyle); 6] = [
        |s| s.size = 19.0,
        |s| s.direction = Direction::RightToLeft,
        |s| s.language = Language::parse("de").unwrap(),
        |s| s.script = Some(Script::CYRILLIC),
        |s| s.set_feature(Tag::from_bytes(*b"liga"), 0),
        |s| s.set_variation(Tag::from_bytes(*b"wght"), 900.0),
    ];
    for (i, change) in changes.into_iter().enumerate() {
        let mut style = base.clone();
        change(&mut style);
        let calls = env.counters.shape_calls();
        let shaped = env.source.shape("hello", &style);
        assert!(
            !Arc::ptr_eq(&original, &shaped),
            "style change {i} returned the cached result"
        );
        assert!(env.counters.shape_calls() > calls, "style change {i} did not reshape");
    }
}

#[test]
fn cache_variations_are_applied_before_shaping() {
    let env = TestEnv::new();
    let style = styled();
    env.source.shape("a", &style);
    env.source.shape("a", &TextStyle::new(18.0));

    let applied = env.counters.applied_variations();
    assert_eq!(applied.len(), 2);
    assert_eq!(applied[0], style.variations());
    assert!(applied[1].is_empty(), "the second style has no variations");
}

#[test]
fn cache_eviction_reshapes_least_recently_used() {
    let env = TestEnv::with_config(FaceSourceConfig {
        shape_cache_capacity: 2,
        ..FaceSourceConfig::default()
    });
    let style = TextStyle::new(12.0);
    let a = env.source.shape("a", &style);
    env.source.shape("b", &style);
    // Touch "a" so that "b" is the least recently used.
    env.source.shape("a", &style);
    env.source.shape("c", &style);
    assert_eq!(env.source.shape_cache_stats().len, 2);

    let calls = env.counters.shape_calls();
    assert!(Arc::ptr_eq(&a, &env.source.shape("a", &style)));
    assert_eq!(env.counters.shape_calls(), calls);
    env.source.shape("b", &style);
    assert_eq!(env.counters.shape_calls(), calls + 1, "\"b\" should have been evicted");
}

#[test]
fn cache_eviction_keeps_capacity_entries() {
    const CAPACITY: usize = 16;
    const EXTRA: usize = 7;
    let cache = KeyedCache::new(CAPACITY);
    for i in 0..CAPACITY + EXTRA {
        cache.get_or_create(i, || (i.to_string(), true));
    }
    let stats = cache.stats();
    assert_eq!(stats.len, CAPACITY);
    assert_eq!(stats.misses, (CAPACITY + EXTRA) as u64);
    assert!((0..EXTRA).all(|i| !cache.contains(&i)));
    assert!((EXTRA..CAPACITY + EXTRA).all(|i| cache.contains(&i)));
}

#[test]
fn cache_uncacheable_values_are_recomputed() {
    let cache = KeyedCache::new(4);
    let first = cache.get_or_create("k", || (1, false));
    let second = cache.get_or_create("k", || (2, true));
    let third = cache.get_or_create("k", || (3, true));
    assert_eq!((first, second, third), (1, 2, 2));
}

#[test]
fn cache_unprintable_feature_tags_are_not_confused() {
    let env = TestEnv::new();
    let mut first = TextStyle::new(18.0);
    first.set_feature(Tag::from_bytes(*b"\xffabc"), 1);
    let mut second = TextStyle::new(18.0);
    second.set_feature(Tag::from_bytes(*b"\xfeabc"), 1);
    assert_ne!(first, second);

    let a = env.source.shape("text", &first);
    let b = env.source.shape("text", &second);
    assert!(!Arc::ptr_eq(&a, &b), "distinct styles must not share a result");
    assert_eq!(env.counters.shape_calls(), 2);
}

#[test]
fn cache_negative_zero_variation_reuses_the_zero_result() {
    let env = TestEnv::new();
    let mut zero = TextStyle::new(18.0);
    zero.set_variation(Tag::from_bytes(*b"wght"), 0.0);
    let mut negative_zero = TextStyle::new(18.0);
    negative_zero.set_variation(Tag::from_bytes(*b"wght"), -0.0);

    let a = env.source.shape("text", &zero);
    let b = env.source.shape("text", &negative_zero);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(env.counters.shape_calls(), 1);
}
