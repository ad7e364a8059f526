// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The writing direction of a run of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Horizontal text flowing left to right.
    #[default]
    LeftToRight,
    /// Horizontal text flowing right to left.
    RightToLeft,
    /// Vertical text flowing top to bottom.
    TopToBottom,
}

impl Direction {
    /// Returns `true` for [`Direction::TopToBottom`].
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom)
    }

    /// Returns `true` for [`Direction::RightToLeft`].
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::RightToLeft)
    }

    /// Returns the canonical name used in cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "ltr",
            Self::RightToLeft => "rtl",
            Self::TopToBottom => "ttb",
        }
    }
}
