// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! From two strings to a [`DiffResult`]: the edit script, the [`DiffGenerator`] that
//! replays it into a [`crate::LineWriter`], and the compression pass.

// Attach sources.
pub mod compression;
pub mod diff_generator;
pub mod diff_result;
pub mod edit_script;

// Re-export.
pub use compression::*;
pub use diff_generator::*;
pub use diff_result::*;
pub use edit_script::*;
