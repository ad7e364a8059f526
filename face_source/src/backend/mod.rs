// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font reading with Skrifa and shaping with HarfRust.

pub(crate) mod harfrust;
pub(crate) mod skrifa;
