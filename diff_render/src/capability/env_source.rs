// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap, env, hash::BuildHasher};

/// Terminal type, eg: `xterm-256color`.
pub const ENV_TERM: &str = "TERM";
/// Set to `truecolor` (or `24bit`) by terminals that render 24-bit color.
pub const ENV_COLORTERM: &str = "COLORTERM";
/// Present in every shell running inside Windows Terminal.
pub const ENV_WT_SESSION: &str = "WT_SESSION";
/// <https://no-color.org/>
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Read access to environment variables. Production code uses [`ProcessEnv`]; tests use
/// a [`HashMap`] so they don't have to mutate the process environment (which is `unsafe`
/// in edition 2024 and racy across test threads).
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> { env::var(key).ok() }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> { self.get(key).cloned() }
}

/// `NO_COLOR` set to anything other than `0` (or empty) disables color.
#[must_use]
pub fn env_no_color(env: &impl EnvSource) -> bool {
    match env.var(ENV_NO_COLOR).as_deref() {
        None | Some("" | "0") => false,
        Some(_) => true,
    }
}
