// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vocabulary types for styling shaped text.
//!
//! This crate is a lightweight, `no_std` layer shared between the shaping engine and its
//! callers. It models the small "leaf" values a text style is built from: OpenType tags and the
//! feature/variation settings keyed by them, ISO 15924 scripts, compact language tags and
//! writing directions.
//!
//! Every type here has a canonical textual form, which is what cache keys are built from.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_primitives::{Direction, FontVariation, Language, Tag};
//!
//! let wght = FontVariation::new(Tag::parse("wght").unwrap(), 700.0);
//! assert_eq!(wght.to_string(), "wght=700");
//!
//! let lang = Language::parse("sr_latn_rs").unwrap();
//! assert_eq!(lang.as_str(), "sr-Latn-RS");
//!
//! assert!(Direction::TopToBottom.is_vertical());
//! ```
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
#![no_std]

extern crate alloc;

mod direction;
mod language;
mod script;
mod tag;

pub use direction::Direction;
pub use language::{Language, ParseLanguageError};
pub use script::{ParseScriptError, Script};
pub use tag::{FontFeature, FontVariation, ParseTagError, Setting, Tag};
