// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Making invisible characters visible, and measuring how wide text is on screen.
//! Padding is sized with [`display_width`], so everything that is measured must first go
//! through [`make_visible`]: a raw `\t` or `\r` has no stable width.

use crate::{DiffError, DiffRenderResult};
use std::{borrow::Cow, fmt::Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Stand-in glyph for a line break, two characters: backslash and `n`.
pub const NEWLINE_MARKER: &str = "\\n";

/// Appended to both values when either of them spans several lines, so the end of the
/// value is visible. Two characters: backslash and `0`.
pub const EOS_MARKER: &str = "\\0";

/// Replaces runs of unchanged rows removed by the compression pass.
pub const OMITTED_LINES_MARKER: &str = "[...]";

/// Replace control characters with a printable escape: `\t` becomes `\\t`, `\r` becomes
/// `\\r`, anything else becomes `\u{..}`. Borrows when there is nothing to replace.
#[must_use]
pub fn make_visible(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }

    let mut acc = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\t' => acc.push_str("\\t"),
            '\r' => acc.push_str("\\r"),
            '\n' => acc.push_str(NEWLINE_MARKER),
            it if it.is_control() => {
                _ = write!(acc, "\\u{{{:x}}}", u32::from(it));
            }
            it => acc.push(it),
        }
    }
    Cow::Owned(acc)
}

/// Number of terminal columns `text` occupies. `text` must not contain control
/// characters (see [`make_visible`]).
#[must_use]
pub fn display_width(text: &str) -> usize {
    // ASCII fast path.
    if text.is_ascii() {
        return text.len();
    }
    UnicodeWidthStr::width(text)
}

/// The padding marker fills exactly one column per column of missing text, so it must
/// be printable and one column wide.
///
/// # Errors
///
/// Returns [`DiffError::InvalidPaddingMarker`] otherwise.
pub fn validate_padding_marker(marker: char) -> DiffRenderResult<char> {
    if marker.is_control() || UnicodeWidthChar::width(marker) != Some(1) {
        return Err(DiffError::InvalidPaddingMarker { marker });
    }
    Ok(marker)
}
