// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors reported by the diff rendering engine. See [`DiffError`] for details.

/// Convenience alias used throughout the crate.
pub type DiffRenderResult<T> = Result<T, DiffError>;

/// Every failure mode of the engine. A render call either returns a complete
/// [`crate::DiffResult`] or one of these, never a partial result.
///
/// | Variant                     | Kind                  | Recoverable?                    |
/// | :-------------------------- | :-------------------- | :------------------------------ |
/// | [`NullArgument`]            | precondition          | No                              |
/// | [`InvalidPaddingMarker`]    | precondition          | No                              |
/// | [`WriterClosed`]            | state (caller bug)    | No                              |
/// | [`UnsupportedPlatform`]     | environment detection | Force an encoding to bypass it  |
/// | [`UnsupportedArchitecture`] | environment detection | Force an encoding to bypass it  |
/// | [`VersionProbeFailed`]      | environment detection | Yes, degraded to version unknown |
/// | [`VersionParse`]            | environment detection | Yes, degraded to version unknown |
///
/// The type is [`Clone`] so the memoized detection result can hand out copies of a
/// cached failure.
///
/// [`NullArgument`]: Self::NullArgument
/// [`InvalidPaddingMarker`]: Self::InvalidPaddingMarker
/// [`WriterClosed`]: Self::WriterClosed
/// [`UnsupportedPlatform`]: Self::UnsupportedPlatform
/// [`UnsupportedArchitecture`]: Self::UnsupportedArchitecture
/// [`VersionProbeFailed`]: Self::VersionProbeFailed
/// [`VersionParse`]: Self::VersionParse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum DiffError {
    #[error("`{name}` may not be null")]
    #[diagnostic(code(r3bl_diff_render::null_argument))]
    NullArgument { name: &'static str },

    #[error("Padding marker {marker:?} must be a printable character one column wide")]
    #[diagnostic(
        code(r3bl_diff_render::invalid_padding_marker),
        help("Use a narrow, visible character such as ' ', '/' or '·'")
    )]
    InvalidPaddingMarker { marker: char },

    #[error("The line writer is closed and can't accept more text")]
    #[diagnostic(
        code(r3bl_diff_render::writer_closed),
        help("A LineWriter can only be closed once, and nothing may be written after that")
    )]
    WriterClosed,

    #[error("Unsupported platform: {name:?}")]
    #[diagnostic(
        code(r3bl_diff_render::unsupported_platform),
        help("Force an encoding with `global_terminal_encoding::set_encoding(.., true)`")
    )]
    UnsupportedPlatform { name: String },

    #[error("Unsupported architecture: {name:?}")]
    #[diagnostic(
        code(r3bl_diff_render::unsupported_architecture),
        help("Force an encoding with `global_terminal_encoding::set_encoding(.., true)`")
    )]
    UnsupportedArchitecture { name: String },

    #[error("Failed to query the operating system version: {reason}")]
    #[diagnostic(code(r3bl_diff_render::version_probe_failed))]
    VersionProbeFailed { reason: String },

    #[error("Could not find a version number in {output:?}")]
    #[diagnostic(code(r3bl_diff_render::version_parse))]
    VersionParse { output: String },
}
