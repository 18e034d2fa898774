// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Figures out which [`crate::TerminalEncoding`]s the host can render, from the
//! operating system, its version and the environment variables.

// Attach sources.
pub mod detect_encoding_support;
pub mod env_source;
pub mod os_info;
pub mod version_probe;

// Re-export.
pub use detect_encoding_support::*;
pub use env_source::*;
pub use os_info::*;
pub use version_probe::*;
