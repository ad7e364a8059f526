// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

/// An ISO 15924 script identifier (four ASCII letters).
///
/// This type stores the canonical `Titlecase` form (e.g. `Latn`, `Cyrl`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Script {
    raw: [u8; 4],
}

impl Script {
    /// The “unknown” script (`Zzzz`).
    pub const UNKNOWN: Self = Self::from_bytes(*b"Zzzz");

    /// The “common” script (`Zyyy`).
    pub const COMMON: Self = Self::from_bytes(*b"Zyyy");

    /// The “inherited” script (`Zinh`).
    pub const INHERITED: Self = Self::from_bytes(*b"Zinh");

    /// Latin (`Latn`).
    pub const LATIN: Self = Self::from_bytes(*b"Latn");

    /// Arabic (`Arab`).
    pub const ARABIC: Self = Self::from_bytes(*b"Arab");

    /// Hebrew (`Hebr`).
    pub const HEBREW: Self = Self::from_bytes(*b"Hebr");

    /// Cyrillic (`Cyrl`).
    pub const CYRILLIC: Self = Self::from_bytes(*b"Cyrl");

    /// Han (`Hani`).
    pub const HAN: Self = Self::from_bytes(*b"Hani");

    /// Creates a `Script` from raw ISO 15924 bytes.
    ///
    /// The input must be four ASCII bytes in canonical form. This function does not validate.
    #[must_use]
    #[inline(always)]
    pub const fn from_bytes(raw: [u8; 4]) -> Self {
        Self { raw }
    }

    /// Returns the raw ISO 15924 bytes.
    #[must_use]
    #[inline(always)]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.raw
    }

    /// Returns the canonical string form (e.g. `Latn`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII letters.
        core::str::from_utf8(&self.raw).unwrap_or("Zzzz")
    }

    /// Returns `false` for the placeholder scripts (`Zyyy`, `Zinh`, `Zzzz`) that take on the
    /// script of the surrounding text.
    #[must_use]
    pub fn is_real(self) -> bool {
        self != Self::COMMON && self != Self::INHERITED && self != Self::UNKNOWN
    }

    /// Parses an ISO 15924 script identifier.
    ///
    /// Parsing is case-insensitive; output is normalized to `Titlecase` (e.g. `LATN` → `Latn`).
    #[inline(always)]
    pub fn parse(s: &str) -> Result<Self, ParseScriptError> {
        s.parse()
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Script").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Script {
    type Err = ParseScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let [first, rest @ ..] = bytes else {
            return Err(ParseScriptError::InvalidLength);
        };
        if rest.len() != 3 {
            return Err(ParseScriptError::InvalidLength);
        }
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(ParseScriptError::InvalidBytes);
        }
        Ok(Self::from_bytes([
            first.to_ascii_uppercase(),
            rest[0].to_ascii_lowercase(),
            rest[1].to_ascii_lowercase(),
            rest[2].to_ascii_lowercase(),
        ]))
    }
}

/// An error returned from parsing a [`Script`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseScriptError {
    /// The input was not exactly four bytes.
    InvalidLength,
    /// The input contained non-ASCII alphabetic bytes.
    InvalidBytes,
}

impl fmt::Display for ParseScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => f.write_str("invalid script length"),
            Self::InvalidBytes => f.write_str("invalid script bytes"),
        }
    }
}

impl core::error::Error for ParseScriptError {}
