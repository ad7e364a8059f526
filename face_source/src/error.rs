// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors that can occur when loading a font.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The font source could not be read.
    #[error("failed to read font data")]
    Io(#[from] std::io::Error),
    /// The font data is malformed.
    #[error("failed to parse font data: {0}")]
    Read(#[from] skrifa::raw::ReadError),
    /// The font has no `head` table, or its units per em is zero.
    #[error("font has no units per em")]
    MissingUnitsPerEm,
    /// The font collection has no members.
    #[error("font collection is empty")]
    EmptyCollection,
    /// The requested font index is not in the collection.
    #[error("font index {index} is out of range for a collection of {count} fonts")]
    IndexOutOfRange {
        /// The requested index.
        index: u32,
        /// The number of fonts in the collection.
        count: u32,
    },
}
