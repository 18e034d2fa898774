// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SgrCode, TerminalEncoding};
use std::fmt::Write;

/// What a fragment of rendered text means, which decides how it is decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum TextRole {
    /// Present on both sides.
    Unchanged,
    /// Only present in the expected value.
    Inserted,
    /// Only present in the actual value.
    Deleted,
    /// Filler on the opposite side of an insertion or deletion.
    Padding,
}

/// Foreground / background pair per role, for one [`TerminalEncoding`]. Unchanged text
/// is never decorated.
struct RoleStyles {
    inserted: &'static [SgrCode],
    deleted: &'static [SgrCode],
    padding: &'static [SgrCode],
}

#[rustfmt::skip]
const BASIC_COLOR_STYLES: RoleStyles = RoleStyles {
    inserted: &[SgrCode::ForegroundAnsi8(7), SgrCode::BackgroundAnsi8(2)],
    deleted:  &[SgrCode::ForegroundAnsi8(7), SgrCode::BackgroundAnsi8(1)],
    padding:  &[SgrCode::Dim, SgrCode::ForegroundAnsi8(7), SgrCode::BackgroundAnsi8(0)],
};

#[rustfmt::skip]
const EXTENDED_COLOR_STYLES: RoleStyles = RoleStyles {
    inserted: &[SgrCode::ForegroundBright(7), SgrCode::BackgroundAnsi8(2)],
    deleted:  &[SgrCode::ForegroundBright(7), SgrCode::BackgroundAnsi8(1)],
    padding:  &[SgrCode::ForegroundAnsi8(7), SgrCode::BackgroundBright(0)],
};

#[rustfmt::skip]
const FULL_COLOR_STYLES: RoleStyles = RoleStyles {
    inserted: &[SgrCode::ForegroundAnsi256(15), SgrCode::BackgroundAnsi256(28)],
    deleted:  &[SgrCode::ForegroundAnsi256(15), SgrCode::BackgroundAnsi256(124)],
    padding:  &[SgrCode::ForegroundAnsi256(244), SgrCode::BackgroundAnsi256(238)],
};

#[rustfmt::skip]
const TRUE_COLOR_STYLES: RoleStyles = RoleStyles {
    inserted: &[SgrCode::ForegroundRGB(255, 255, 255), SgrCode::BackgroundRGB(0, 135, 0)],
    deleted:  &[SgrCode::ForegroundRGB(255, 255, 255), SgrCode::BackgroundRGB(175, 0, 0)],
    padding:  &[SgrCode::ForegroundRGB(128, 128, 128), SgrCode::BackgroundRGB(68, 68, 68)],
};

/// Wraps text fragments in the escape sequences for a [`TerminalEncoding`]. The prefix
/// for each role, and the reset that ends it, are rendered once when the set is
/// created.
///
/// Decoration never changes the visible characters: it's always `prefix + text +
/// reset`, and for [`TerminalEncoding::NoColor`] it's the identity.
///
/// ```
/// use r3bl_diff_render::{DecoratorSet, TerminalEncoding, TextRole};
///
/// let plain = DecoratorSet::for_encoding(TerminalEncoding::NoColor);
/// assert_eq!(plain.decorate(TextRole::Inserted, "5"), "5");
/// assert_eq!(plain.stop(), "");
///
/// let colored = DecoratorSet::for_encoding(TerminalEncoding::FullColor);
/// assert_eq!(
///     colored.decorate(TextRole::Inserted, "5"),
///     "\x1b[38;5;15m\x1b[48;5;28m5\x1b[0m"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorSet {
    encoding: TerminalEncoding,
    inserted_prefix: String,
    deleted_prefix: String,
    padding_prefix: String,
    reset: String,
}

impl DecoratorSet {
    #[must_use]
    pub fn for_encoding(encoding: TerminalEncoding) -> Self {
        let styles = match encoding {
            TerminalEncoding::NoColor => None,
            TerminalEncoding::BasicColor => Some(&BASIC_COLOR_STYLES),
            TerminalEncoding::ExtendedColor => Some(&EXTENDED_COLOR_STYLES),
            TerminalEncoding::FullColor => Some(&FULL_COLOR_STYLES),
            TerminalEncoding::TrueColor => Some(&TRUE_COLOR_STYLES),
        };

        match styles {
            None => Self {
                encoding,
                inserted_prefix: String::new(),
                deleted_prefix: String::new(),
                padding_prefix: String::new(),
                reset: String::new(),
            },
            Some(styles) => Self {
                encoding,
                inserted_prefix: render_prefix(styles.inserted),
                deleted_prefix: render_prefix(styles.deleted),
                padding_prefix: render_prefix(styles.padding),
                reset: SgrCode::Reset.to_string(),
            },
        }
    }

    #[must_use]
    pub fn encoding(&self) -> TerminalEncoding { self.encoding }

    /// `true` if nothing is ever decorated.
    #[must_use]
    pub fn is_plain(&self) -> bool { self.encoding == TerminalEncoding::NoColor }

    /// Escape sequence that starts `role`. Empty if `role` is not decorated.
    #[must_use]
    pub fn prefix(&self, role: TextRole) -> &str {
        match role {
            TextRole::Unchanged => "",
            TextRole::Inserted => &self.inserted_prefix,
            TextRole::Deleted => &self.deleted_prefix,
            TextRole::Padding => &self.padding_prefix,
        }
    }

    #[must_use]
    pub fn decorate(&self, role: TextRole, text: &str) -> String {
        let mut acc = String::with_capacity(text.len() + self.prefix(role).len() + 4);
        self.decorate_into(role, text, &mut acc);
        acc
    }

    /// Same as [`Self::decorate`], but appends to `acc` instead of allocating.
    pub fn decorate_into(&self, role: TextRole, text: &str, acc: &mut String) {
        let prefix = self.prefix(role);
        if text.is_empty() || prefix.is_empty() {
            acc.push_str(text);
            return;
        }
        acc.push_str(prefix);
        acc.push_str(text);
        acc.push_str(&self.reset);
    }

    /// Sequence that undoes any decoration. Emitting it more than once, or when nothing
    /// was decorated, is harmless.
    #[must_use]
    pub fn stop(&self) -> &str { &self.reset }
}

fn render_prefix(codes: &[SgrCode]) -> String {
    let mut acc = String::new();
    for code in codes {
        // Writing to a String can't fail.
        _ = write!(acc, "{code}");
    }
    acc
}
