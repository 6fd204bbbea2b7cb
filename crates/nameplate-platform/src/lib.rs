// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! Operating-system and host-environment detection.
//!
//! Leaf crate with no side effects: both detectors are pure, total
//! functions. The rest of the workspace treats their output as the single
//! source of truth for which renaming mechanisms apply on this host.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// OperatingSystem
// ---------------------------------------------------------------------------

/// Operating-system family the current process runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingSystem {
    /// Linux: both the generic title and the kernel comm rename apply.
    Linux,
    /// macOS: generic title only. The per-thread rename primitive does not
    /// change what monitoring tools launched later report, so it is skipped.
    MacOs,
    /// Windows: generic title only; no native equivalent exists.
    Windows,
    /// Unrecognized platform: generic title only, native mechanisms skipped.
    Unknown,
}

impl OperatingSystem {
    /// Stable lowercase tag, matching `std::env::consts::OS` where recognized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HostEnvironment
// ---------------------------------------------------------------------------

/// Runtime hosting this build, as far as facility reachability goes.
///
/// A compiled binary has no script engine to guess at; the one distinction
/// that matters is whether a native syscall bridge is linked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEnvironment {
    /// Ordinary native target with direct OS access.
    Native,
    /// WebAssembly target: no syscall bridge, generic facilities only.
    Wasm,
}

impl HostEnvironment {
    /// Whether the generic process-title facility is reachable.
    ///
    /// The title register is in-process state, so this holds on every
    /// environment the workspace targets.
    #[must_use]
    pub fn has_title_facility(self) -> bool {
        match self {
            Self::Native | Self::Wasm => true,
        }
    }

    /// Whether a native syscall bridge is linked into this build.
    #[must_use]
    pub fn has_syscall_bridge(self) -> bool {
        matches!(self, Self::Native)
    }

    /// Stable lowercase tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Wasm => "wasm",
        }
    }
}

impl fmt::Display for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Determine the operating-system family for the current process.
///
/// Total: every platform maps to exactly one variant, with unrecognized
/// identifiers folded to [`OperatingSystem::Unknown`]. Cheap enough to
/// recompute on every call; never cached.
#[must_use]
pub fn detect_operating_system() -> OperatingSystem {
    match std::env::consts::OS {
        "linux" => OperatingSystem::Linux,
        "macos" => OperatingSystem::MacOs,
        "windows" => OperatingSystem::Windows,
        _ => OperatingSystem::Unknown,
    }
}

/// Determine the host environment for this build.
///
/// Compile-time-known; surfaced as a function so callers and diagnostics
/// share one code path.
#[must_use]
pub fn detect_environment() -> HostEnvironment {
    if cfg!(target_family = "wasm") {
        HostEnvironment::Wasm
    } else {
        HostEnvironment::Native
    }
}
