// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-call outcome and capability records.

use nameplate_platform::{HostEnvironment, OperatingSystem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// SetOutcome
// ---------------------------------------------------------------------------

/// What one rename attempt actually did, per mechanism.
///
/// `None` means a mechanism was not attempted because it does not apply on
/// this host; `Some(false)` means it was attempted and failed. Neither is an
/// error: process naming is cosmetic, and a caller's program must never
/// crash because a monitoring-tool convenience fell through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOutcome {
    /// True iff at least one attempted mechanism succeeded.
    pub overall_success: bool,
    /// Generic title mechanism: write-then-readback verification result.
    pub title_result: Option<bool>,
    /// Kernel comm rename: `Some(_)` on Linux with a syscall bridge, `None`
    /// everywhere else.
    pub native_result: Option<bool>,
    /// Operating system detected for this call.
    pub os: OperatingSystem,
    /// Host environment detected for this call.
    pub host: HostEnvironment,
}

impl SetOutcome {
    /// Number of mechanisms that were actually attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        usize::from(self.title_result.is_some()) + usize::from(self.native_result.is_some())
    }
}

// ---------------------------------------------------------------------------
// CapabilitySnapshot
// ---------------------------------------------------------------------------

/// What a rename call could achieve here, without attempting anything.
///
/// Derived from the same fact table the setter consults, so the two views
/// never diverge: `can_set_native_name` is `true` exactly when a call on
/// this host produces `native_result == Some(_)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySnapshot {
    /// Whether the generic title facility is reachable.
    pub can_set_generic_title: bool,
    /// Whether the kernel comm rename applies on this host.
    pub can_set_native_name: bool,
    /// Operating system the table was derived for.
    pub os: OperatingSystem,
    /// Host environment the table was derived for.
    pub host: HostEnvironment,
}

// ---------------------------------------------------------------------------
// NameError
// ---------------------------------------------------------------------------

/// The single hard error a rename call can raise.
///
/// Raised before any mechanism runs; every mechanism-level failure is folded
/// into the [`SetOutcome`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    /// The supplied name is not valid Unicode text.
    #[error("process name is not valid Unicode text")]
    InvalidName,
}

// ===========================================================================
// Tests
// ===========================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SetOutcome {
        SetOutcome {
            overall_success: true,
            title_result: Some(true),
            native_result: Some(false),
            os: OperatingSystem::Linux,
            host: HostEnvironment::Native,
        }
    }

    #[test]
    fn attempted_counts_some_fields() {
        assert_eq!(sample().attempted(), 2);

        let none = SetOutcome {
            overall_success: false,
            title_result: Some(false),
            native_result: None,
            os: OperatingSystem::Windows,
            host: HostEnvironment::Native,
        };
        assert_eq!(none.attempted(), 1);
    }

    #[test]
    fn set_outcome_serde_roundtrip() {
        let outcome = sample();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SetOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn snapshot_serde_roundtrip() {
        let caps = CapabilitySnapshot {
            can_set_generic_title: true,
            can_set_native_name: false,
            os: OperatingSystem::MacOs,
            host: HostEnvironment::Native,
        };
        let json = serde_json::to_string(&caps).unwrap();
        let back: CapabilitySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, caps);
    }

    #[test]
    fn error_message_names_the_problem() {
        assert_eq!(
            NameError::InvalidName.to_string(),
            "process name is not valid Unicode text"
        );
    }
}
