// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod resolve_encoding;
pub mod terminal_encoding;

// Re-export.
pub use resolve_encoding::*;
pub use terminal_encoding::*;
