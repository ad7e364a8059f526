// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting styled text into runs that can each be shaped with a single call.

use text_primitives::{Direction, Script};
use unicode_bidi::{BidiInfo, Level};
use unicode_script::UnicodeScript;

use crate::shaper::ShapeDirection;
use crate::style::TextStyle;

/// A run of text with a single script and shaping direction.
///
/// `start` and `end` are scalar indices into the text the run was split from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Segment {
    /// First scalar of the run.
    pub(crate) start: usize,
    /// One past the last scalar of the run.
    pub(crate) end: usize,
    /// The resolved script.
    pub(crate) script: Script,
    /// The shaping direction.
    pub(crate) direction: ShapeDirection,
}

/// Splits `text` into runs in text order.
///
/// `chars` must be `text.chars()` collected. Horizontal text is split where the resolved bidi
/// direction or the script changes; vertical text where the script or the vertical orientation
/// changes. Characters without a script of their own (spaces, punctuation, combining marks)
/// belong to the run before them; at the start of the text they take the style's script, or
/// else the first script found in the text.
pub(crate) fn segment(text: &str, chars: &[char], style: &TextStyle) -> Vec<Segment> {
    if chars.is_empty() {
        return Vec::new();
    }

    let scripts = resolve_scripts(chars, style.script);
    let directions: Vec<ShapeDirection> = if style.direction.is_vertical() {
        scripts.iter().map(|&s| vertical_direction(s)).collect()
    } else {
        bidi_directions(text, style.direction)
    };

    let mut segments = Vec::new();
    let mut start = 0;
    for i in 1..=chars.len() {
        if i == chars.len() || scripts[i] != scripts[start] || directions[i] != directions[start] {
            segments.push(Segment {
                start,
                end: i,
                script: scripts[start],
                direction: directions[start],
            });
            start = i;
        }
    }
    segments
}

/// Converts a script from `unicode-script`'s enumeration.
pub(crate) fn script_from_unicode(script: unicode_script::Script) -> Script {
    Script::parse(script.short_name()).unwrap_or(Script::UNKNOWN)
}

fn resolve_scripts(chars: &[char], fallback: Option<Script>) -> Vec<Script> {
    let raw: Vec<Script> = chars.iter().map(|ch| script_from_unicode(ch.script())).collect();
    let leading = fallback
        .filter(|s| s.is_real())
        .or_else(|| raw.iter().copied().find(|s| s.is_real()))
        .unwrap_or(Script::UNKNOWN);

    let mut current = leading;
    raw.into_iter()
        .map(|script| {
            if script.is_real() {
                current = script;
            }
            current
        })
        .collect()
}

/// Per-scalar directions from the Unicode bidi algorithm, with the paragraph level taken from
/// `direction`.
fn bidi_directions(text: &str, direction: Direction) -> Vec<ShapeDirection> {
    let paragraph = if direction.is_rtl() {
        Level::rtl()
    } else {
        Level::ltr()
    };
    let levels = BidiInfo::new(text, Some(paragraph)).levels;
    text.char_indices()
        .map(|(byte_pos, _)| {
            if levels[byte_pos].is_rtl() {
                ShapeDirection::RTL
            } else {
                ShapeDirection::LTR
            }
        })
        .collect()
}

fn vertical_direction(script: Script) -> ShapeDirection {
    if is_upright(script) {
        ShapeDirection::new(Direction::TopToBottom)
    } else {
        ShapeDirection::sideways()
    }
}

/// Scripts whose glyphs stay upright in vertical text.
fn is_upright(script: Script) -> bool {
    matches!(
        &script.to_bytes(),
        b"Hani" | b"Hira" | b"Kana" | b"Hang" | b"Bopo" | b"Yiii"
    )
}
