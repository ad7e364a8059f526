// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

/// A compact, zero-allocation language tag.
///
/// Only the `language` + optional `script` + optional `region` subtags of a BCP 47 tag are kept,
/// normalized to the usual casing:
/// - language: lowercase (2–3 letters)
/// - script: titlecase (4 letters)
/// - region: uppercase (2 letters) or digits (3 digits)
///
/// Later subtags (variants, extensions, private use) are accepted and dropped. Both `-` and `_`
/// separate subtags.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    bytes: [u8; Self::MAX_LEN],
    len: u8,
    language_len: u8,
}

impl Language {
    /// The maximum length of the canonical `language[-Script][-REGION]` form.
    pub const MAX_LEN: usize = 12;

    /// The “undefined” language (`und`).
    pub const UND: Self = Self {
        bytes: *b"und\0\0\0\0\0\0\0\0\0",
        len: 3,
        language_len: 3,
    };

    /// Parses a language tag, keeping only language/script/region.
    #[inline(always)]
    pub fn parse(s: &str) -> Result<Self, ParseLanguageError> {
        s.parse()
    }

    /// Returns the canonical string form (`language[-Script][-REGION]`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII.
        core::str::from_utf8(&self.bytes[..usize::from(self.len)]).unwrap_or("und")
    }

    /// Returns the primary language subtag (lowercase).
    #[must_use]
    pub fn language(&self) -> &str {
        &self.as_str()[..usize::from(self.language_len)]
    }

    /// Returns the script subtag (titlecase), if present.
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.subtags().find(|s| s.len() == 4)
    }

    /// Returns the region subtag (uppercase or digits), if present.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.subtags().find(|s| s.len() != 4)
    }

    fn subtags(&self) -> impl Iterator<Item = &str> {
        self.as_str().split('-').skip(1)
    }

    fn push(&mut self, subtag: &[u8], case: Case) {
        if self.len != 0 {
            self.bytes[usize::from(self.len)] = b'-';
            self.len += 1;
        }
        for (i, b) in subtag.iter().enumerate() {
            let b = match case {
                Case::Lower => b.to_ascii_lowercase(),
                Case::Upper => b.to_ascii_uppercase(),
                Case::Title if i == 0 => b.to_ascii_uppercase(),
                Case::Title => b.to_ascii_lowercase(),
            };
            self.bytes[usize::from(self.len)] = b;
            self.len += 1;
        }
    }
}

#[derive(Clone, Copy)]
enum Case {
    Lower,
    Upper,
    Title,
}

impl Default for Language {
    fn default() -> Self {
        Self::UND
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "the primary subtag is at most 3 bytes"
    )]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s
            .split(['-', '_'])
            .filter(|p| !p.is_empty())
            .map(str::as_bytes)
            .peekable();

        let language = parts.next().ok_or(ParseLanguageError::InvalidLanguage)?;
        if !(2..=3).contains(&language.len()) || !language.iter().all(u8::is_ascii_alphabetic) {
            return Err(ParseLanguageError::InvalidLanguage);
        }
        let mut out = Self {
            bytes: [0; Self::MAX_LEN],
            len: 0,
            language_len: language.len() as u8,
        };
        out.push(language, Case::Lower);

        if let Some(script) = parts.next_if(|p| p.len() == 4) {
            if !script.iter().all(u8::is_ascii_alphabetic) {
                return Err(ParseLanguageError::InvalidScript);
            }
            out.push(script, Case::Title);
        }

        if let Some(region) = parts.next_if(|p| p.len() == 2 || p.len() == 3) {
            let alpha2 = region.len() == 2 && region.iter().all(u8::is_ascii_alphabetic);
            let digit3 = region.len() == 3 && region.iter().all(u8::is_ascii_digit);
            if !(alpha2 || digit3) {
                return Err(ParseLanguageError::InvalidRegion);
            }
            out.push(region, Case::Upper);
        }

        // Whatever follows (variants, extensions, private use) is dropped, but it must at least
        // be made of alphanumeric subtags.
        if parts.any(|p| p.len() > 8 || !p.iter().all(u8::is_ascii_alphanumeric)) {
            return Err(ParseLanguageError::InvalidSubtag);
        }
        Ok(out)
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Language").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned when parsing a [`Language`] fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseLanguageError {
    /// The input did not contain a valid primary language subtag.
    InvalidLanguage,
    /// The script subtag was malformed.
    InvalidScript,
    /// The region subtag was malformed.
    InvalidRegion,
    /// A trailing subtag was malformed.
    InvalidSubtag,
}

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLanguage => f.write_str("invalid primary language subtag"),
            Self::InvalidScript => f.write_str("invalid script subtag"),
            Self::InvalidRegion => f.write_str("invalid region subtag"),
            Self::InvalidSubtag => f.write_str("invalid language subtag sequence"),
        }
    }
}

impl core::error::Error for ParseLanguageError {}
