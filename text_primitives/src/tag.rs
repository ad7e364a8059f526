// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

/// A 4-byte OpenType tag (for example `wght`, `liga`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tag(u32);

impl Tag {
    /// Creates a tag from 4 bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Creates a tag from its big-endian `u32` representation.
    pub const fn from_u32(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns this tag as 4 bytes.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Returns the big-endian `u32` representation, as used by shaping and font libraries.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Parses a tag from a 4-character ASCII string.
    ///
    /// Shorter inputs are padded with spaces, as OpenType allows (`"cv1"` is `"cv1 "`).
    pub fn parse(s: &str) -> Result<Self, ParseTagError> {
        s.parse()
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 {
            return Err(ParseTagError::InvalidLength);
        }
        if !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            return Err(ParseTagError::InvalidBytes);
        }
        let mut raw = [b' '; 4];
        raw[..bytes.len()].copy_from_slice(bytes);
        Ok(Self::from_bytes(raw))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tag").field(&format_args!("{self}")).finish()
    }
}

/// Printable tags are written as their four characters. Any other tag is written as its raw
/// value in hexadecimal (`0x00ff0041`), which can't be mistaken for a printable tag.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        match core::str::from_utf8(&bytes) {
            Ok(s) if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') => f.write_str(s),
            _ => write!(f, "{:#010x}", self.0),
        }
    }
}

/// An error returned from parsing a [`Tag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseTagError {
    /// The input was empty or longer than four bytes.
    InvalidLength,
    /// The input contained bytes outside printable ASCII.
    InvalidBytes,
}

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => f.write_str("invalid tag length"),
            Self::InvalidBytes => f.write_str("invalid tag bytes"),
        }
    }
}

impl core::error::Error for ParseTagError {}

/// A single OpenType setting (tag + value).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Setting<T> {
    /// The OpenType tag for this setting.
    pub tag: Tag,
    /// The setting value.
    pub value: T,
}

impl<T> Setting<T> {
    /// Creates a new setting.
    pub const fn new(tag: Tag, value: T) -> Self {
        Self { tag, value }
    }
}

/// The canonical `tag=value` form used when building cache keys.
impl<T: fmt::Display> fmt::Display for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)
    }
}

/// An OpenType feature toggle, such as `liga=0` or `salt=2`.
pub type FontFeature = Setting<u16>;

/// A variation axis assignment, such as `wght=700`.
pub type FontVariation = Setting<f32>;
