// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeSet;

/// How much decoration the output destination can render. Variants are declared in
/// increasing order of richness, so the derived [`Ord`] is also the rank used when
/// picking the best supported encoding.
///
/// | Variant           | Colors     | SGR syntax                  |
/// | :---------------- | :--------- | :-------------------------- |
/// | [`NoColor`]       | 0          | none, plain text            |
/// | [`BasicColor`]    | 8          | `30-37` / `40-47`           |
/// | [`ExtendedColor`] | 16         | adds bright `90-97` / `100-107` |
/// | [`FullColor`]     | 256        | `38;5;n` / `48;5;n`         |
/// | [`TrueColor`]     | 16 million | `38;2;r;g;b` / `48;2;r;g;b` |
///
/// The string form is kebab-case (`no-color`, `true-color`, ...), which is what the
/// `diffr` binary accepts on the command line.
///
/// [`NoColor`]: Self::NoColor
/// [`BasicColor`]: Self::BasicColor
/// [`ExtendedColor`]: Self::ExtendedColor
/// [`FullColor`]: Self::FullColor
/// [`TrueColor`]: Self::TrueColor
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::EnumCount,
)]
#[strum(serialize_all = "kebab-case")]
pub enum TerminalEncoding {
    NoColor,
    BasicColor,
    ExtendedColor,
    FullColor,
    TrueColor,
}

impl TerminalEncoding {
    /// Fixed rank of this encoding. Higher is richer.
    #[must_use]
    pub const fn rank(self) -> u8 { self as u8 }
}

/// These trait implementations allow us to use `TerminalEncoding` and `i8`
/// interchangeably, which is how the encoding is kept in an atomic slot.
mod convert_between_encoding_and_i8 {
    impl TryFrom<i8> for super::TerminalEncoding {
        type Error = ();

        #[rustfmt::skip]
        fn try_from(value: i8) -> Result<Self, Self::Error> {
            match value {
                0 => Ok(super::TerminalEncoding::NoColor),
                1 => Ok(super::TerminalEncoding::BasicColor),
                2 => Ok(super::TerminalEncoding::ExtendedColor),
                3 => Ok(super::TerminalEncoding::FullColor),
                4 => Ok(super::TerminalEncoding::TrueColor),
                _ => Err(()),
            }
        }
    }

    impl From<super::TerminalEncoding> for i8 {
        #[rustfmt::skip]
        fn from(value: super::TerminalEncoding) -> Self {
            match value {
                super::TerminalEncoding::NoColor       => 0,
                super::TerminalEncoding::BasicColor    => 1,
                super::TerminalEncoding::ExtendedColor => 2,
                super::TerminalEncoding::FullColor     => 3,
                super::TerminalEncoding::TrueColor     => 4,
            }
        }
    }
}

/// The set of [`TerminalEncoding`]s the environment can plausibly render.
/// [`TerminalEncoding::NoColor`] is always a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingSupport {
    encodings: BTreeSet<TerminalEncoding>,
}

impl Default for EncodingSupport {
    fn default() -> Self { Self::no_color_only() }
}

impl EncodingSupport {
    #[must_use]
    pub fn no_color_only() -> Self {
        Self {
            encodings: BTreeSet::from([TerminalEncoding::NoColor]),
        }
    }

    #[must_use]
    pub fn from_encodings(encodings: impl IntoIterator<Item = TerminalEncoding>) -> Self {
        let mut it = Self::no_color_only();
        it.encodings.extend(encodings);
        it
    }

    pub fn insert(&mut self, encoding: TerminalEncoding) {
        self.encodings.insert(encoding);
    }

    pub fn extend(&mut self, encodings: impl IntoIterator<Item = TerminalEncoding>) {
        self.encodings.extend(encodings);
    }

    #[must_use]
    pub fn contains(&self, encoding: TerminalEncoding) -> bool {
        self.encodings.contains(&encoding)
    }

    /// Highest ranked supported encoding.
    #[must_use]
    pub fn best(&self) -> TerminalEncoding {
        self.encodings
            .last()
            .copied()
            .unwrap_or(TerminalEncoding::NoColor)
    }

    /// Supported encodings, lowest rank first.
    pub fn encodings(&self) -> impl Iterator<Item = TerminalEncoding> + '_ {
        self.encodings.iter().copied()
    }
}
