// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod decorator_set;
pub mod sgr_code;

// Re-export.
pub use decorator_set::*;
pub use sgr_code::*;
