// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Querying the Windows version. The production [`CommandVersionProbe`] shells out to
//! `cmd /c ver`, which prints something like:
//!
//! ```text
//! Microsoft Windows [Version 10.0.19045.3803]
//! ```
//!
//! The word `Version` is localized on non-English installs, so the parser only relies on
//! the square brackets and the dotted numbers inside them.

use crate::{DiffError, DiffRenderResult, OperatingSystemVersion};
use nom::{IResult, Parser,
          bytes::complete::{take_till, take_until},
          character::complete::{char, u32 as decimal},
          combinator::opt,
          sequence::preceded};
use std::process::Command;

/// Source of the operating system version. This is a seam so tests can stub out the
/// subprocess. Any `Fn() -> DiffRenderResult<OperatingSystemVersion>` is a probe.
pub trait VersionProbe {
    /// # Errors
    ///
    /// Returns [`DiffError::VersionProbeFailed`] if the version could not be queried, or
    /// [`DiffError::VersionParse`] if the answer could not be understood.
    fn probe(&self) -> DiffRenderResult<OperatingSystemVersion>;
}

impl<F> VersionProbe for F
where
    F: Fn() -> DiffRenderResult<OperatingSystemVersion>,
{
    fn probe(&self) -> DiffRenderResult<OperatingSystemVersion> { self() }
}

/// Runs a command (`cmd /c ver` by default) and parses its output. This blocks until
/// the subprocess exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandVersionProbe {
    program: &'static str,
    args: &'static [&'static str],
}

impl Default for CommandVersionProbe {
    fn default() -> Self { Self::new("cmd", &["/c", "ver"]) }
}

impl CommandVersionProbe {
    #[must_use]
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

impl VersionProbe for CommandVersionProbe {
    fn probe(&self) -> DiffRenderResult<OperatingSystemVersion> {
        let output = Command::new(self.program)
            .args(self.args)
            .output()
            .map_err(|error| DiffError::VersionProbeFailed {
                reason: format!("`{}`: {error}", self.program),
            })?;

        if !output.status.success() {
            return Err(DiffError::VersionProbeFailed {
                reason: format!("`{}` exited with {}", self.program, output.status),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_windows_version(&stdout)
    }
}

/// Extract the version from the output of `ver`.
///
/// # Errors
///
/// Returns [`DiffError::VersionParse`] if there is no `[... major.minor[.build[.rev]]]`
/// group in `output`.
pub fn parse_windows_version(output: &str) -> DiffRenderResult<OperatingSystemVersion> {
    match parse_bracketed_version(output) {
        Ok((_, version)) => Ok(version),
        Err(_) => Err(DiffError::VersionParse {
            output: output.trim().to_string(),
        }),
    }
}

/// - Parse input: `Microsoft Windows [Version 10.0.19045.3803]`.
/// - Skips everything up to `[`, then any non digit label, then reads the numbers.
#[rustfmt::skip]
fn parse_bracketed_version(input: &str) -> IResult<&str, OperatingSystemVersion> {
    let (input, _) = take_until("[").parse(input)?;
    let (input, _) = char('[').parse(input)?;
    let (input, _) = take_till(|it: char| it.is_ascii_digit() || it == ']').parse(input)?;
    let (input, major) = decimal(input)?;
    let (input, minor) = preceded(char('.'), decimal).parse(input)?;
    let (input, build) = opt(preceded(char('.'), decimal)).parse(input)?;
    let (input, revision) = opt(preceded(char('.'), decimal)).parse(input)?;
    let (input, _) = char(']').parse(input)?;

    let it = OperatingSystemVersion {
        major: Some(major),
        minor: Some(minor),
        build,
        revision,
    };

    Ok((input, it))
}
