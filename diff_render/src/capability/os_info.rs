// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Operating system type, version and architecture. See [`OperatingSystemInfo`].

use crate::{CommandVersionProbe, DiffError, DiffRenderResult, VersionProbe};
use std::{env,
          fmt::{Display, Formatter, Result as FmtResult},
          sync::OnceLock};

/// Operating system families this crate knows how to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum OperatingSystemType {
    Windows,
    Linux,
    MacOs,
    FreeBsd,
    OpenBsd,
    NetBsd,
    DragonFly,
    Solaris,
    Aix,
    Android,
    Ios,
}

/// Lowercase prefixes of platform identifiers, matched in order.
#[rustfmt::skip]
const PLATFORM_PREFIXES: &[(&str, OperatingSystemType)] = &[
    ("windows",   OperatingSystemType::Windows),
    ("linux",     OperatingSystemType::Linux),
    ("mac",       OperatingSystemType::MacOs),
    ("darwin",    OperatingSystemType::MacOs),
    ("freebsd",   OperatingSystemType::FreeBsd),
    ("openbsd",   OperatingSystemType::OpenBsd),
    ("netbsd",    OperatingSystemType::NetBsd),
    ("dragonfly", OperatingSystemType::DragonFly),
    ("sunos",     OperatingSystemType::Solaris),
    ("solaris",   OperatingSystemType::Solaris),
    ("illumos",   OperatingSystemType::Solaris),
    ("aix",       OperatingSystemType::Aix),
    ("android",   OperatingSystemType::Android),
    ("ios",       OperatingSystemType::Ios),
];

impl OperatingSystemType {
    /// Case-insensitive prefix match of `name` (eg: `"Windows 11"`, `"linux"`,
    /// `"Mac OS X"`) against the known families.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::UnsupportedPlatform`] if no family matches.
    pub fn from_platform_name(name: &str) -> DiffRenderResult<Self> {
        let lowercase = name.trim().to_ascii_lowercase();
        PLATFORM_PREFIXES
            .iter()
            .find(|(prefix, _)| lowercase.starts_with(prefix))
            .map(|(_, it)| *it)
            .ok_or_else(|| DiffError::UnsupportedPlatform {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn is_windows(self) -> bool { self == OperatingSystemType::Windows }
}

/// CPU architectures this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Architecture {
    X86,
    X86_64,
    Arm,
    Aarch64,
    PowerPc,
    PowerPc64,
    RiscV64,
    S390x,
    Mips,
    Mips64,
    LoongArch64,
    Sparc64,
    Wasm32,
}

#[rustfmt::skip]
const ARCHITECTURE_NAMES: &[(&str, Architecture)] = &[
    ("x86",         Architecture::X86),
    ("i386",        Architecture::X86),
    ("i586",        Architecture::X86),
    ("i686",        Architecture::X86),
    ("x86_64",      Architecture::X86_64),
    ("amd64",       Architecture::X86_64),
    ("arm",         Architecture::Arm),
    ("aarch64",     Architecture::Aarch64),
    ("arm64",       Architecture::Aarch64),
    ("powerpc",     Architecture::PowerPc),
    ("powerpc64",   Architecture::PowerPc64),
    ("ppc64",       Architecture::PowerPc64),
    ("riscv64",     Architecture::RiscV64),
    ("s390x",       Architecture::S390x),
    ("mips",        Architecture::Mips),
    ("mips64",      Architecture::Mips64),
    ("loongarch64", Architecture::LoongArch64),
    ("sparc64",     Architecture::Sparc64),
    ("wasm32",      Architecture::Wasm32),
];

impl Architecture {
    /// Case-insensitive exact match of `name` (eg: `"x86_64"`, `"AMD64"`).
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::UnsupportedArchitecture`] if the name is unknown.
    pub fn from_arch_name(name: &str) -> DiffRenderResult<Self> {
        let lowercase = name.trim().to_ascii_lowercase();
        ARCHITECTURE_NAMES
            .iter()
            .find(|(known, _)| *known == lowercase)
            .map(|(_, it)| *it)
            .ok_or_else(|| DiffError::UnsupportedArchitecture {
                name: name.to_string(),
            })
    }
}

/// `major.minor.build.revision`, where each component may be absent.
///
/// The derived ordering compares components left to right, and an absent component
/// ([`None`]) is lower than any present one. So `10.0` < `10.0.0` < `10.0.1`, and an
/// unknown version is lower than everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatingSystemVersion {
    pub major: Option<u32>,
    pub minor: Option<u32>,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl OperatingSystemVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major: Some(major),
            minor: Some(minor),
            build: Some(build),
            revision: None,
        }
    }

    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            major: None,
            minor: None,
            build: None,
            revision: None,
        }
    }

    #[must_use]
    pub const fn with_revision(mut self, revision: u32) -> Self {
        self.revision = Some(revision);
        self
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool { self.major.is_none() }
}

impl Display for OperatingSystemVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_unknown() {
            return write!(f, "unknown");
        }
        let components = [self.major, self.minor, self.build, self.revision];
        let mut first = true;
        for component in components.into_iter().flatten() {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}

/// Type, version and architecture of the host operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingSystemInfo {
    pub kind: OperatingSystemType,
    pub version: OperatingSystemVersion,
    pub architecture: Architecture,
}

static OS_INFO: OnceLock<DiffRenderResult<OperatingSystemInfo>> = OnceLock::new();

impl OperatingSystemInfo {
    /// Detects the host once per process and caches the result (including a failure).
    /// Concurrent first callers block until the one detection run finishes.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::UnsupportedPlatform`] or
    /// [`DiffError::UnsupportedArchitecture`] if the host isn't recognized.
    pub fn current() -> DiffRenderResult<&'static OperatingSystemInfo> {
        OS_INFO
            .get_or_init(|| {
                Self::detect_with(env::consts::OS, env::consts::ARCH, &CommandVersionProbe::default())
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Builds the info from explicit platform identifiers. The version is only probed
    /// on Windows, the only family whose color support depends on it. A failing probe
    /// is logged and the version is reported as unknown.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::UnsupportedPlatform`] or
    /// [`DiffError::UnsupportedArchitecture`] if either name isn't recognized.
    #[tracing::instrument(skip(probe))]
    pub fn detect_with(
        platform_name: &str,
        arch_name: &str,
        probe: &dyn VersionProbe,
    ) -> DiffRenderResult<Self> {
        let kind = OperatingSystemType::from_platform_name(platform_name)?;
        let architecture = Architecture::from_arch_name(arch_name)?;

        let version = if kind.is_windows() {
            probe.probe().unwrap_or_else(|error| {
                // % is Display, ? is Debug.
                tracing::warn!(
                    message = "Could not determine the Windows version, assuming unknown",
                    error = %error
                );
                OperatingSystemVersion::unknown()
            })
        } else {
            OperatingSystemVersion::unknown()
        };

        let it = Self {
            kind,
            version,
            architecture,
        };

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Detected operating system",
            kind = %it.kind,
            version = %it.version,
            architecture = %it.architecture
        );

        Ok(it)
    }
}
