// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `diffr` prints the aligned difference between two strings (or two files), the same
//! way it would appear in an assertion failure message. Exits with `1` if they differ.
//!
//! ```text
//! $ diffr 'int[6]' 'int[5]'
//! Actual  : int[6 ]
//! Diff    :     -+
//! Expected: int[ 5]
//! ```

use clap::Parser;
use miette::IntoDiagnostic;
use r3bl_diff_render::{DiffConfig, DiffGenerator, DisplayPreference, TerminalEncoding,
                       global_terminal_encoding, try_initialize_logging_global};
use std::{fs, process::ExitCode};

#[derive(Debug, Parser)]
#[command(bin_name = "diffr")]
#[command(about = "Show the aligned difference between an actual and an expected value")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(true))]
/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    #[arg(value_name = "ACTUAL", help = "The actual value (a path with --files)")]
    pub actual: String,

    #[arg(value_name = "EXPECTED", help = "The expected value (a path with --files)")]
    pub expected: String,

    #[arg(long, short = 'f', help = "Treat ACTUAL and EXPECTED as paths to read")]
    pub files: bool,

    #[arg(
        long,
        short = 'e',
        value_name = "ENCODING",
        help = "Force an encoding: no-color, basic-color, extended-color, full-color, true-color"
    )]
    pub encoding: Option<TerminalEncoding>,

    #[arg(long, help = "Don't collapse runs of unchanged lines to [...]")]
    pub no_compress: bool,

    #[arg(
        long,
        short = 'p',
        default_value_t = ' ',
        help = "Character filling the columns missing on one side"
    )]
    pub padding: char,

    #[arg(long, short = 'l', help = "Log debug output to stderr")]
    pub enable_logging: bool,
}

impl CLIArg {
    fn read_values(&self) -> miette::Result<(String, String)> {
        if !self.files {
            return Ok((self.actual.clone(), self.expected.clone()));
        }
        let actual = fs::read_to_string(&self.actual).into_diagnostic()?;
        let expected = fs::read_to_string(&self.expected).into_diagnostic()?;
        Ok((actual, expected))
    }
}

fn main() -> miette::Result<ExitCode> {
    // If no args are passed, the following line will fail, and help will be printed
    // thanks to `arg_required_else_help(true)`.
    let cli_arg = CLIArg::parse();

    let enable_logging = cli_arg.enable_logging;
    if enable_logging {
        try_initialize_logging_global(tracing_core::LevelFilter::DEBUG, DisplayPreference::Stderr)?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let (actual, expected) = cli_arg.read_values()?;

    let encoding = match cli_arg.encoding {
        Some(it) => global_terminal_encoding::set_encoding(it, true)?,
        None => global_terminal_encoding::resolve()?,
    };

    let config = DiffConfig::default()
        .padding_marker(cli_arg.padding)
        .compress_unchanged(!cli_arg.no_compress);
    let result = DiffGenerator::with_config(encoding, config).diff(&actual, &expected)?;

    print!("{result}");

    if enable_logging {
        tracing::debug!(message = "Stop logging...", rows = %result.len());
    }

    Ok(if result.is_identical() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
