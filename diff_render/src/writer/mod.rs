// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod line_writer;
pub mod visible_text;

// Re-export.
pub use line_writer::*;
pub use visible_text::*;
