// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging is **DISABLED** by **default**. The library only emits [`tracing`] events
//! (capability detection results, the resolved encoding, render summaries). Nothing is
//! printed unless a subscriber is installed, eg: with [`try_initialize_logging_global`].

use miette::IntoDiagnostic;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

/// Where log output goes. Rendered diffs go to stdout, so the default keeps logs out of
/// their way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    #[default]
    Stderr,
}

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_target(false)
    };
}

/// This erases the concrete type of the writer, and returns a boxed layer. Returns
/// [`None`] if `level_filter` is [`LevelFilter::OFF`].
#[must_use]
pub fn create_display_layer<S>(
    level_filter: LevelFilter,
    display_preference: DisplayPreference,
) -> Option<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    if level_filter == LevelFilter::OFF {
        return None;
    }

    // Shared configuration regardless of where logs are output to.
    let fmt_layer = create_fmt!();

    Some(match display_preference {
        DisplayPreference::Stdout => Box::new(
            fmt_layer
                .with_writer(std::io::stdout)
                .with_filter(level_filter),
        ),
        DisplayPreference::Stderr => Box::new(
            fmt_layer
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        ),
    })
}

/// Global default subscriber, which once set, can't be unset or changed. This is meant
/// for binaries, such as `diffr`.
///
/// If `level_filter` is [`LevelFilter::OFF`], nothing is installed and logging stays
/// disabled.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn try_initialize_logging_global(
    level_filter: LevelFilter,
    display_preference: DisplayPreference,
) -> miette::Result<()> {
    // Early return if the level filter is off.
    let Some(layer) = create_display_layer(level_filter, display_preference) else {
        return Ok(());
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .into_diagnostic()
}
