// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text shaping and glyph image caching for a single font.
//!
//! A [`FaceSource`] owns one font and shapes runs of styled text into positioned glyph outlines,
//! scaled to the requested size. Results are cached by text and style, so repeating a call
//! returns the earlier result without shaping again. Glyph images are produced by the caller
//! (this crate doesn't rasterize) and cached per size.
//!
//! Fonts are read with [Skrifa](skrifa) and shaped with [HarfRust](harfrust) by default; any
//! [`FontResource`] and [`Shaper`] can be used instead.
//!
//! ```no_run
//! use face_source::{FaceSource, TextStyle};
//!
//! let file = std::fs::File::open("NotoSans-Regular.ttf")?;
//! let source = FaceSource::<Vec<u8>>::from_reader(file)?;
//! let shaped = source.shape("Hello", &TextStyle::new(24.0));
//! for glyph in shaped.glyphs() {
//!     println!("{} covers {}..{}", glyph.glyph_id, glyph.start_index, glyph.end_index);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `testing`: Exposes the `testing` module, a deterministic font and shaper for tests.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use harfrust;
pub use kurbo;
pub use skrifa;
pub use text_primitives;

mod backend;
pub mod cache;
mod error;
mod fixed;
pub mod font;
mod key;
mod segment;
mod shape;
pub mod shaper;
mod source;
mod style;
pub mod subpixel;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::harfrust::HarfrustShaper;
pub use backend::skrifa::SkrifaFont;
pub use cache::{CacheStats, KeyedCache};
pub use error::LoadError;
pub use fixed::F26Dot6;
pub use font::{FontResource, GlyphData, GlyphId, Metadata, ScaledMetrics};
pub use key::{GlyphImageCacheKey, ShapingCacheKey};
pub use shape::{Glyph, ShapedText};
pub use shaper::{ShapeDirection, ShapeInput, ShapedGlyph, ShapedOutput, Shaper};
pub use source::{FaceSource, FaceSourceConfig, PositionedImage};
pub use style::TextStyle;
pub use text_primitives::{Direction, FontFeature, FontVariation, Language, Script, Tag};
