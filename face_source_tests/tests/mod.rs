// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `face_source`.
//!
//! - The `util` module holds the test environment: a face source over the deterministic test
//!   font and shaper, with their shared call counters.
//! - We use this `mod.rs` file as the single entry point instead of one test binary per file, so
//!   the utilities are compiled once.
//! - Put the topic of a test at the start of its name (`cache_eviction_keeps_capacity`), so
//!   related tests sort together.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::missing_assert_message, reason = "not critical for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod cache;
mod concurrency;
mod util;
