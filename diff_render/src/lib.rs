// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_diff_render
//!
//! Renders the difference between an "actual" and an "expected" string as a set of
//! visually aligned lines, ready to be embedded in an assertion failure message.
//!
//! ```text
//! Actual  : int[6 ]
//! Diff    :     -+
//! Expected: int[ 5]
//! ```
//!
//! The pipeline looks like this:
//!
//! ```text
//!   actual, expected
//!          │
//!          ▼
//! ┌──────────────────┐   EOS marker appended when either value is multi-line
//! │  DiffGenerator   │
//! └────────┬─────────┘
//!          │ EditScript (Myers + semantic cleanup)
//!          ▼
//!   Keep / Insert / Delete
//!          │
//!          ▼
//! ┌──────────────────┐   DecoratorSet picked from the resolved TerminalEncoding
//! │   LineWriter     │ ◀── global_terminal_encoding ◀── global_encoding_support
//! └────────┬─────────┘
//!          │ rows (actual / middle / expected)
//!          ▼
//!   compression pass (long unchanged runs collapse to `[...]`)
//!          │
//!          ▼
//!      DiffResult
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use r3bl_diff_render::{DiffGenerator, TerminalEncoding};
//!
//! let generator = DiffGenerator::new(TerminalEncoding::NoColor);
//! let result = generator.diff("int[6]", "int[5]").unwrap();
//! assert_eq!(result.actual_lines(), ["int[6 ]"]);
//! assert_eq!(result.expected_lines(), ["int[ 5]"]);
//! ```
//!
//! Use [`diff()`] to render with whatever encoding the current terminal supports (see
//! [`global_terminal_encoding`]), or [`DiffGenerator`] to pass the encoding explicitly.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod capability;
pub mod decorate;
pub mod diff_engine;
pub mod encoding;
pub mod error;
pub mod log;
pub mod writer;

// Re-export.
pub use capability::*;
pub use decorate::*;
pub use diff_engine::*;
pub use encoding::*;
pub use error::*;
pub use log::*;
pub use writer::*;
