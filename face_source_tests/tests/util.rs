// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

use std::sync::Arc;

use face_source::testing::{Counters, TestFont, TestShaper};
use face_source::{FaceSource, FaceSourceConfig};

/// A face source over the test font and shaper, with the image type used throughout the tests.
pub(crate) type TestSource = FaceSource<Arc<str>, TestFont, TestShaper>;

pub(crate) struct TestEnv {
    pub(crate) source: TestSource,
    pub(crate) counters: Arc<Counters>,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::with_shaper(TestShaper::default(), FaceSourceConfig::default())
    }

    pub(crate) fn with_config(config: FaceSourceConfig) -> Self {
        Self::with_shaper(TestShaper::default(), config)
    }

    /// Builds an environment whose font and shaper both record into one set of counters.
    pub(crate) fn with_shaper(shaper: TestShaper, config: FaceSourceConfig) -> Self {
        init_logger();
        let counters = shaper.counters();
        let font = TestFont::with_counters(Arc::clone(&counters));
        Self {
            source: FaceSource::with_config(font, shaper, config),
            counters,
        }
    }
}

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
