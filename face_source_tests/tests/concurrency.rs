// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sharing caches and face sources between threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use face_source::testing::TestShaper;
use face_source::{
    FaceSourceConfig, FontVariation, GlyphImageCacheKey, KeyedCache, Tag, TextStyle,
};

use crate::util::TestEnv;

const THREADS: usize = 8;

#[test]
fn concurrency_cache_computes_each_key_once() {
    let cache = KeyedCache::new(4);
    let computed = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    let values: Vec<Arc<String>> = thread::scope(|scope| {
        let (cache, computed, barrier) = (&cache, &computed, &barrier);
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    cache.get_or_create("shared", || {
                        computed.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(20));
                        (Arc::new(String::from("value")), true)
                    })
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(computed.load(Ordering::SeqCst), 1);
    assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
}

#[test]
fn concurrency_waiters_share_an_uncacheable_value() {
    let cache = KeyedCache::new(4);
    let computed = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                let value = cache.get_or_create(1, || {
                    let n = computed.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(5));
                    (n, false)
                });
                assert!(value < THREADS);
            });
        }
    });

    // Nothing is kept, however the computations interleaved.
    assert!(cache.is_empty());
    assert!(computed.load(Ordering::SeqCst) >= 1);
}

#[test]
fn concurrency_shape_runs_the_shaper_once() {
    let shaper = TestShaper::new().with_delay(Duration::from_millis(20));
    let env = TestEnv::with_shaper(shaper, FaceSourceConfig::default());
    let style = TextStyle::new(16.0);
    let barrier = Barrier::new(THREADS);

    let results: Vec<_> = thread::scope(|scope| {
        let (env, style, barrier) = (&env, &style, &barrier);
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    env.source.shape("shared text", style)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(env.counters.shape_calls(), 1);
    assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
}

#[test]
fn concurrency_each_shape_sees_its_own_variations() {
    const WGHT: Tag = Tag::from_bytes(*b"wght");
    let shaper = TestShaper::new().with_delay(Duration::from_millis(5));
    let env = TestEnv::with_shaper(shaper, FaceSourceConfig::default());
    let barrier = Barrier::new(THREADS);
    let weight = |i: usize| 100.0 * (i + 1) as f32;
    let letter = |i: usize| char::from(b'a' + i as u8);

    thread::scope(|scope| {
        for i in 0..THREADS {
            let (env, barrier) = (&env, &barrier);
            scope.spawn(move || {
                let mut style = TextStyle::new(16.0);
                style.set_variation(WGHT, weight(i));
                let text: String = [letter(i); 3].iter().collect();
                barrier.wait();
                let shaped = env.source.shape(&text, &style);
                assert!(
                    shaped.glyphs().iter().all(|g| g.glyph_id == u32::from(letter(i))),
                    "thread {i} got another thread's glyphs"
                );
            });
        }
    });

    assert_eq!(env.counters.applied_variations().len(), THREADS);
    let reads = env.counters.glyph_reads();
    assert_eq!(reads.len(), THREADS * 3);
    for (glyph_id, variations) in reads {
        let i = (0..THREADS)
            .find(|&i| u32::from(letter(i)) == glyph_id)
            .expect("every glyph comes from one thread's text");
        assert_eq!(
            variations,
            [FontVariation::new(WGHT, weight(i))],
            "glyph {glyph_id} was read with another style's variations"
        );
    }
}

#[test]
fn concurrency_distinct_texts_are_all_shaped() {
    let env = TestEnv::new();
    let style = TextStyle::new(16.0);

    thread::scope(|scope| {
        for i in 0..THREADS {
            let env = &env;
            let style = &style;
            scope.spawn(move || {
                for round in 0..4 {
                    let text = format!("text {i}");
                    let shaped = env.source.shape(&text, style);
                    assert_eq!(shaped.glyphs().len(), text.chars().count(), "round {round}");
                }
            });
        }
    });

    assert_eq!(env.counters.shape_calls(), THREADS);
    assert_eq!(env.source.shape_cache_stats().len, THREADS);
}

#[test]
fn concurrency_images_are_rasterized_once() {
    let env = TestEnv::new();
    let style = TextStyle::new(16.0);
    let rasterized = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                let key = GlyphImageCacheKey::new(
                    42,
                    face_source::F26Dot6::ZERO,
                    face_source::F26Dot6::ZERO,
                    &style,
                );
                env.source.glyph_image(&style, key, || {
                    rasterized.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(10));
                    (Arc::from("image"), true)
                })
            });
        }
    });

    assert_eq!(rasterized.load(Ordering::SeqCst), 1);
    assert_eq!(env.source.glyph_image_cache_count(), 1);
}
