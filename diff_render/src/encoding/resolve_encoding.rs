// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DiffRenderResult, EncodingSupport, ProcessEnv, TerminalEncoding, env_no_color,
            global_encoding_support};
use std::sync::atomic::{AtomicBool, AtomicI8, Ordering};

/// # The process wide active encoding
///
/// A single slot holds the [`TerminalEncoding`] used by [`crate::diff()`]. It is filled
/// lazily: the first [`resolve()`] runs [`use_best()`], unless [`set_encoding()`] got
/// there first. Writes are plain overwrites (last writer wins), so the slot is an atomic
/// and no lock is held.
///
/// ```
/// use r3bl_diff_render::{TerminalEncoding, global_terminal_encoding};
///
/// // Forcing always wins, even if the terminal can't render it.
/// let it = global_terminal_encoding::set_encoding(TerminalEncoding::TrueColor, true);
/// assert_eq!(it, Ok(TerminalEncoding::TrueColor));
/// assert_eq!(global_terminal_encoding::resolve(), Ok(TerminalEncoding::TrueColor));
///
/// global_terminal_encoding::clear();
/// ```
///
/// # Testing support
///
/// Tests that touch this slot must be annotated with `#[serial]` from the
/// [serial_test](https://crates.io/crates/serial_test) crate, since tests run in
/// parallel.
///
/// [`resolve()`]: global_terminal_encoding::resolve
/// [`use_best()`]: global_terminal_encoding::use_best
/// [`set_encoding()`]: global_terminal_encoding::set_encoding
pub mod global_terminal_encoding {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    static TERMINAL_ENCODING: AtomicI8 = AtomicI8::new(NOT_SET_VALUE);

    /// Set when the value in [`TERMINAL_ENCODING`] was forced by the caller.
    static FORCED: AtomicBool = AtomicBool::new(false);

    const NOT_SET_VALUE: i8 = -1;

    /// The active encoding. The first call (after startup or [`clear()`]) runs
    /// [`use_best()`].
    ///
    /// # Errors
    ///
    /// Propagates detection errors from [`use_best()`].
    pub fn resolve() -> DiffRenderResult<TerminalEncoding> {
        match try_get() {
            Ok(it) => Ok(it),
            Err(()) => use_best(),
        }
    }

    /// Commit the richest supported encoding. Falls back to [`TerminalEncoding::NoColor`]
    /// if stdout isn't a terminal or `NO_COLOR` is set. A forced encoding (see
    /// [`set_encoding()`]) is left in place and returned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiffError::UnsupportedPlatform`] or
    /// [`crate::DiffError::UnsupportedArchitecture`] if capability detection fails.
    pub fn use_best() -> DiffRenderResult<TerminalEncoding> {
        if FORCED.load(Ordering::Acquire)
            && let Ok(forced) = try_get()
        {
            return Ok(forced);
        }

        let support = global_encoding_support::detect()?;
        let it = resolve_best(&support, helpers::is_interactive());
        store(it, false);

        // % is Display, ? is Debug.
        tracing::debug!(message = "Using best terminal encoding", encoding = %it);

        Ok(it)
    }

    /// Commit `encoding`.
    /// - `force = true`: it is committed as is, without looking at the terminal. This is
    ///   for tests and explicit user configuration, and it also sidesteps detection
    ///   errors.
    /// - `force = false`: it is committed only if it is supported and stdout is a
    ///   terminal, otherwise [`TerminalEncoding::NoColor`] is.
    ///
    /// Returns the committed encoding.
    ///
    /// # Errors
    ///
    /// With `force = false`, propagates capability detection errors.
    pub fn set_encoding(
        encoding: TerminalEncoding,
        force: bool,
    ) -> DiffRenderResult<TerminalEncoding> {
        let it = if force {
            encoding
        } else {
            let support = global_encoding_support::detect()?;
            resolve_requested(encoding, &support, helpers::is_interactive())
        };
        store(it, force);

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Set terminal encoding",
            requested = %encoding,
            committed = %it,
            force = force
        );

        Ok(it)
    }

    /// Empty the slot, so the next [`resolve()`] runs [`use_best()`] again.
    pub fn clear() {
        TERMINAL_ENCODING.store(NOT_SET_VALUE, Ordering::Release);
        FORCED.store(false, Ordering::Release);
    }

    /// Get the committed encoding.
    ///
    /// # Errors
    ///
    /// Returns `Err(())` if nothing has been committed yet.
    #[allow(clippy::result_unit_err)]
    pub fn try_get() -> Result<TerminalEncoding, ()> {
        let it = TERMINAL_ENCODING.load(Ordering::Acquire);
        TerminalEncoding::try_from(it)
    }

    fn store(encoding: TerminalEncoding, forced: bool) {
        FORCED.store(forced, Ordering::Release);
        TERMINAL_ENCODING.store(i8::from(encoding), Ordering::Release);
    }
}

/// Richest encoding in `support`, or [`TerminalEncoding::NoColor`] if the output isn't
/// interactive.
#[must_use]
pub fn resolve_best(support: &EncodingSupport, is_interactive: bool) -> TerminalEncoding {
    if is_interactive {
        support.best()
    } else {
        TerminalEncoding::NoColor
    }
}

/// `requested` if it is in `support` and the output is interactive, else
/// [`TerminalEncoding::NoColor`].
#[must_use]
pub fn resolve_requested(
    requested: TerminalEncoding,
    support: &EncodingSupport,
    is_interactive: bool,
) -> TerminalEncoding {
    if is_interactive && support.contains(requested) {
        requested
    } else {
        TerminalEncoding::NoColor
    }
}

mod helpers {
    use super::{ProcessEnv, env_no_color};

    #[must_use]
    pub fn is_a_tty() -> bool {
        use std::io::IsTerminal;
        std::io::stdout().is_terminal()
    }

    /// Decorated output only makes sense on a terminal whose user hasn't opted out.
    #[must_use]
    pub fn is_interactive() -> bool { is_a_tty() && !env_no_color(&ProcessEnv) }
}
