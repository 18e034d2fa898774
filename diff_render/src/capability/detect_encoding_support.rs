// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DiffRenderResult, ENV_COLORTERM, ENV_TERM, ENV_WT_SESSION, EncodingSupport,
            EnvSource, OperatingSystemInfo, OperatingSystemVersion, ProcessEnv,
            TerminalEncoding};
use std::sync::OnceLock;
use strum::IntoEnumIterator;

/// Windows 10 build that added VT processing for the 16 color SGR codes.
pub const WINDOWS_16_COLOR_THRESHOLD: OperatingSystemVersion =
    OperatingSystemVersion::new(10, 0, 10586);

/// Windows 10 build that added 256 color and 24-bit color SGR codes.
pub const WINDOWS_TRUE_COLOR_THRESHOLD: OperatingSystemVersion =
    OperatingSystemVersion::new(10, 0, 14931);

/// # Memoized encoding support detection
///
/// Detecting the supported encodings may run a subprocess (on Windows) and reads several
/// environment variables. It only happens once per process: the first caller of
/// [`detect()`] runs it, concurrent first callers block until it is done, and everyone
/// after that gets the cached answer. A detection failure (eg: an unrecognized
/// platform) is cached as well.
///
/// ```
/// use r3bl_diff_render::{TerminalEncoding, global_encoding_support};
///
/// if let Ok(support) = global_encoding_support::detect() {
///     assert!(support.contains(TerminalEncoding::NoColor));
/// }
/// ```
pub mod global_encoding_support {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    static ENCODING_SUPPORT_CACHED: OnceLock<DiffRenderResult<EncodingSupport>> =
        OnceLock::new();

    /// Supported encodings of the current process' environment.
    ///
    /// # Errors
    ///
    /// Returns the (cached) [`crate::DiffError::UnsupportedPlatform`] or
    /// [`crate::DiffError::UnsupportedArchitecture`] if the host isn't recognized.
    pub fn detect() -> DiffRenderResult<EncodingSupport> {
        ENCODING_SUPPORT_CACHED
            .get_or_init(|| -> DiffRenderResult<EncodingSupport> {
                let os_info = OperatingSystemInfo::current()?;
                Ok(examine_env_to_determine_encoding_support(
                    os_info,
                    &ProcessEnv,
                ))
            })
            .clone()
    }
}

/// Determine the supported encodings heuristically, from the operating system and the
/// environment variables.
///
/// - Windows: only Windows Terminal (`WT_SESSION` is set) is trusted to render SGR
///   codes, and what it can render depends on the Windows build. See
///   [`WINDOWS_16_COLOR_THRESHOLD`] and [`WINDOWS_TRUE_COLOR_THRESHOLD`].
/// - Everything else: `TERM` picks 8, 16 or 256 colors, and `COLORTERM=truecolor` (or
///   `24bit`) adds 24-bit color.
///
/// [`TerminalEncoding::NoColor`] is always supported. Prefer the memoized
/// [`global_encoding_support::detect()`] over calling this directly.
#[tracing::instrument(skip(env))]
pub fn examine_env_to_determine_encoding_support(
    os_info: &OperatingSystemInfo,
    env: &impl EnvSource,
) -> EncodingSupport {
    let it = if os_info.kind.is_windows() {
        examine_windows(os_info.version, env)
    } else {
        examine_unix(env)
    };

    // % is Display, ? is Debug.
    tracing::debug!(
        message = "Detected encoding support",
        best = %it.best(),
        encodings = ?it.encodings().collect::<Vec<_>>()
    );

    it
}

fn examine_windows(version: OperatingSystemVersion, env: &impl EnvSource) -> EncodingSupport {
    if env.var(ENV_WT_SESSION).is_none() {
        return EncodingSupport::no_color_only();
    }

    let richest = if version >= WINDOWS_TRUE_COLOR_THRESHOLD {
        TerminalEncoding::TrueColor
    } else if version >= WINDOWS_16_COLOR_THRESHOLD {
        TerminalEncoding::ExtendedColor
    } else {
        TerminalEncoding::NoColor
    };

    EncodingSupport::from_encodings(helpers::up_to(richest))
}

fn examine_unix(env: &impl EnvSource) -> EncodingSupport {
    let mut it = EncodingSupport::no_color_only();

    match env.var(ENV_TERM) {
        Some(term) => match helpers::term_to_encoding(&term) {
            Some(richest) => it.extend(helpers::up_to(richest)),
            None => {
                // % is Display, ? is Debug.
                tracing::warn!(
                    message = "Unknown TERM value, assuming no color support",
                    term = %term
                );
            }
        },
        None => tracing::debug!(message = "TERM is not set, assuming no color support"),
    }

    if env
        .var(ENV_COLORTERM)
        .is_some_and(|it| helpers::check_true_color(&it))
    {
        it.insert(TerminalEncoding::TrueColor);
    }

    it
}

mod helpers {
    use super::{IntoEnumIterator, TerminalEncoding};

    /// Well known `TERM` values, matched exactly.
    #[rustfmt::skip]
    const KNOWN_TERMS: &[(&str, TerminalEncoding)] = &[
        ("dumb",                  TerminalEncoding::NoColor),
        ("unknown",               TerminalEncoding::NoColor),
        ("vt100",                 TerminalEncoding::NoColor),
        ("ansi",                  TerminalEncoding::BasicColor),
        ("cygwin",                TerminalEncoding::BasicColor),
        ("linux",                 TerminalEncoding::BasicColor),
        ("screen",                TerminalEncoding::BasicColor),
        ("tmux",                  TerminalEncoding::BasicColor),
        ("vt220",                 TerminalEncoding::BasicColor),
        ("eterm",                 TerminalEncoding::BasicColor),
        ("xterm",                 TerminalEncoding::ExtendedColor),
        ("xterm-color",           TerminalEncoding::ExtendedColor),
        ("rxvt",                  TerminalEncoding::ExtendedColor),
        ("rxvt-unicode",          TerminalEncoding::ExtendedColor),
        ("putty",                 TerminalEncoding::ExtendedColor),
        ("konsole",               TerminalEncoding::ExtendedColor),
        ("gnome",                 TerminalEncoding::ExtendedColor),
        ("alacritty",             TerminalEncoding::FullColor),
        ("foot",                  TerminalEncoding::FullColor),
        ("wezterm",               TerminalEncoding::FullColor),
        ("xterm-kitty",           TerminalEncoding::FullColor),
        ("xterm-ghostty",         TerminalEncoding::FullColor),
    ];

    /// The richest encoding `term` is known to render, or [`None`] if `term` is unknown.
    #[must_use]
    pub fn term_to_encoding(term: &str) -> Option<TerminalEncoding> {
        let term = term.trim().to_ascii_lowercase();

        if let Some((_, it)) = KNOWN_TERMS.iter().find(|(known, _)| *known == term) {
            return Some(*it);
        }

        if term.ends_with("-direct") || term.ends_with("-truecolor") {
            Some(TerminalEncoding::TrueColor)
        } else if term.ends_with("-256color") || term.ends_with("-256") {
            Some(TerminalEncoding::FullColor)
        } else if term.ends_with("-16color") {
            Some(TerminalEncoding::ExtendedColor)
        } else if term.ends_with("-color") || term.ends_with("-8color") {
            Some(TerminalEncoding::BasicColor)
        } else {
            None
        }
    }

    #[must_use]
    pub fn check_true_color(colorterm: &str) -> bool {
        matches!(colorterm.trim().to_ascii_lowercase().as_str(), "truecolor" | "24bit")
    }

    /// Each tier implies all the tiers below it.
    pub fn up_to(richest: TerminalEncoding) -> impl Iterator<Item = TerminalEncoding> {
        TerminalEncoding::iter().filter(move |it| *it <= richest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Architecture, OperatingSystemType};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use test_case::test_case;

    fn env_with(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    fn os(kind: OperatingSystemType, version: OperatingSystemVersion) -> OperatingSystemInfo {
        OperatingSystemInfo {
            kind,
            version,
            architecture: Architecture::X86_64,
        }
    }

    fn linux() -> OperatingSystemInfo {
        os(OperatingSystemType::Linux, OperatingSystemVersion::unknown())
    }

    fn windows(build: u32) -> OperatingSystemInfo {
        os(
            OperatingSystemType::Windows,
            OperatingSystemVersion::new(10, 0, build),
        )
    }

    #[test_case("xterm-256color", TerminalEncoding::FullColor)]
    #[test_case("screen-256color", TerminalEncoding::FullColor)]
    #[test_case("xterm", TerminalEncoding::ExtendedColor)]
    #[test_case("rxvt-16color", TerminalEncoding::ExtendedColor)]
    #[test_case("linux", TerminalEncoding::BasicColor)]
    #[test_case("xterm-direct", TerminalEncoding::TrueColor)]
    #[test_case("dumb", TerminalEncoding::NoColor)]
    fn unix_term_sets_the_richest_tier(term: &str, richest: TerminalEncoding) {
        let support =
            examine_env_to_determine_encoding_support(&linux(), &env_with(&[(ENV_TERM, term)]));
        assert_eq!(support.best(), richest);
        for encoding in TerminalEncoding::iter() {
            assert_eq!(support.contains(encoding), encoding <= richest, "{encoding}");
        }
    }

    #[test]
    fn unknown_or_missing_term_is_no_color() {
        let unknown = examine_env_to_determine_encoding_support(
            &linux(),
            &env_with(&[(ENV_TERM, "hal-9000")]),
        );
        assert_eq!(unknown, EncodingSupport::no_color_only());

        let missing = examine_env_to_determine_encoding_support(&linux(), &env_with(&[]));
        assert_eq!(missing, EncodingSupport::no_color_only());
    }

    #[test_case("truecolor")]
    #[test_case("24bit")]
    #[test_case("TrueColor")]
    fn colorterm_adds_true_color(colorterm: &str) {
        let support = examine_env_to_determine_encoding_support(
            &linux(),
            &env_with(&[(ENV_TERM, "xterm"), (ENV_COLORTERM, colorterm)]),
        );
        assert!(support.contains(TerminalEncoding::TrueColor));
        assert!(support.contains(TerminalEncoding::ExtendedColor));
        assert!(!support.contains(TerminalEncoding::FullColor));
    }

    #[test]
    fn colorterm_without_term() {
        let support = examine_env_to_determine_encoding_support(
            &linux(),
            &env_with(&[(ENV_COLORTERM, "truecolor")]),
        );
        assert_eq!(support.best(), TerminalEncoding::TrueColor);
        assert!(!support.contains(TerminalEncoding::BasicColor));
    }

    #[test]
    fn unrelated_colorterm_is_ignored() {
        let support = examine_env_to_determine_encoding_support(
            &linux(),
            &env_with(&[(ENV_TERM, "xterm-256color"), (ENV_COLORTERM, "yes")]),
        );
        assert_eq!(support.best(), TerminalEncoding::FullColor);
    }

    #[test_case(10585, TerminalEncoding::NoColor)]
    #[test_case(10586, TerminalEncoding::ExtendedColor)]
    #[test_case(14930, TerminalEncoding::ExtendedColor)]
    #[test_case(14931, TerminalEncoding::TrueColor)]
    #[test_case(22631, TerminalEncoding::TrueColor)]
    fn windows_terminal_thresholds(build: u32, richest: TerminalEncoding) {
        let support = examine_env_to_determine_encoding_support(
            &windows(build),
            &env_with(&[(ENV_WT_SESSION, "0b5e2bd4-8f43-4e0e-9d33-1f3fbb4a8f10")]),
        );
        assert_eq!(support.best(), richest);
        for encoding in TerminalEncoding::iter() {
            assert_eq!(support.contains(encoding), encoding <= richest, "{encoding}");
        }
    }

    #[test]
    fn windows_without_terminal_marker_is_no_color() {
        let support = examine_env_to_determine_encoding_support(
            &windows(22631),
            &env_with(&[(ENV_TERM, "xterm-256color"), (ENV_COLORTERM, "truecolor")]),
        );
        assert_eq!(support, EncodingSupport::no_color_only());
    }

    #[test]
    fn windows_with_unknown_version_is_no_color() {
        let support = examine_env_to_determine_encoding_support(
            &os(OperatingSystemType::Windows, OperatingSystemVersion::unknown()),
            &env_with(&[(ENV_WT_SESSION, "1")]),
        );
        assert_eq!(support, EncodingSupport::no_color_only());
    }

    #[test]
    fn detect_is_memoized() {
        let first = global_encoding_support::detect();
        let second = global_encoding_support::detect();
        assert_eq!(first, second);
        if let Ok(support) = first {
            assert!(support.contains(TerminalEncoding::NoColor));
        }
    }
}
