// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! Set the name of the calling process as monitoring tools see it.
//!
//! There is no portable "rename this process" call: each operating system
//! exposes a different mechanism with different length caps and visibility
//! rules. This crate detects the host, applies every mechanism that exists
//! there in priority order, and reports per mechanism what actually
//! happened — a failed rename is a `Some(false)` in the returned
//! [`SetOutcome`], never an error.
//!
//! ```no_run
//! # async fn demo() -> Result<(), nameplate::NameError> {
//! let outcome = nameplate::set_process_name("my-service").await?;
//! assert_eq!(outcome.title_result, Some(true));
//! # Ok(())
//! # }
//! ```
//!
//! The only hard error is [`NameError::InvalidName`] for a name that is not
//! valid Unicode, raised before any mechanism runs. Renaming is best-effort
//! by design: `overall_success == false` is a legitimate, silent outcome,
//! and concurrent calls race on the OS-global name last-writer-wins.

mod outcome;

use std::ffi::OsStr;
use std::io;
use tracing::{debug, warn};

#[cfg(target_os = "linux")]
pub use nameplate_facility::KernelComm;
pub use nameplate_facility::{
    CommFacility, DefaultComm, ProcessTitle, TitleFacility, UnsupportedComm,
};
pub use nameplate_platform::{
    detect_environment, detect_operating_system, HostEnvironment, OperatingSystem,
};
pub use outcome::{CapabilitySnapshot, NameError, SetOutcome};

/// Longest label the native mechanism accepts. The Linux comm buffer holds
/// 16 bytes including a mandatory NUL terminator, leaving 15 for the label.
pub const COMM_LEN_MAX: usize = 15;

// ---------------------------------------------------------------------------
// Capability query
// ---------------------------------------------------------------------------

/// Describe what a [`set_process_name`] call could achieve on this host,
/// without attempting anything.
///
/// Pure and side-effect free; recomputed per call, never cached.
#[must_use]
pub fn capabilities() -> CapabilitySnapshot {
    snapshot(detect_operating_system(), detect_environment())
}

/// The fact table. Both [`capabilities`] and the setters derive their
/// mechanism policy from here, which is what keeps the two views consistent.
fn snapshot(os: OperatingSystem, host: HostEnvironment) -> CapabilitySnapshot {
    CapabilitySnapshot {
        can_set_generic_title: host.has_title_facility(),
        can_set_native_name: os == OperatingSystem::Linux && host.has_syscall_bridge(),
        os,
        host,
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Rename the current process, suspending on the native write.
///
/// Mechanisms run in priority order: the generic title first (verbatim, with
/// readback verification), then the kernel comm rename where one exists.
/// Mechanism failures are recorded in the returned [`SetOutcome`], never
/// raised.
///
/// # Errors
///
/// [`NameError::InvalidName`] when `name` is not valid Unicode. Raised
/// before any mechanism runs; no other error leaves this function.
pub async fn set_process_name(name: impl AsRef<OsStr>) -> Result<SetOutcome, NameError> {
    set_process_name_with(&ProcessTitle, &DefaultComm::default(), name).await
}

/// Blocking twin of [`set_process_name`]; the decision logic is identical.
///
/// The native facility is statically linked into this build, so unlike hosts
/// that resolve it on first use, the blocking path never under-delivers the
/// native mechanism.
///
/// # Errors
///
/// [`NameError::InvalidName`] when `name` is not valid Unicode.
pub fn set_process_name_blocking(name: impl AsRef<OsStr>) -> Result<SetOutcome, NameError> {
    set_process_name_blocking_with(&ProcessTitle, &DefaultComm::default(), name)
}

/// [`set_process_name`] with explicit facility seams.
///
/// Applicability still follows the host fact table, not the supplied
/// facilities: injecting a facility swaps how a mechanism runs, never
/// whether it runs.
///
/// # Errors
///
/// [`NameError::InvalidName`] when `name` is not valid Unicode.
pub async fn set_process_name_with<T, C>(
    title: &T,
    native: &C,
    name: impl AsRef<OsStr>,
) -> Result<SetOutcome, NameError>
where
    T: TitleFacility + ?Sized,
    C: CommFacility + ?Sized,
{
    let name = name.as_ref();
    let name = valid_name(name)?;
    let caps = capabilities();

    let title_result = apply_title(title, name, &caps);
    let native_result = if caps.can_set_native_name {
        let label = native_label(name);
        Some(record_native(native.set_comm(label).await, label))
    } else {
        None
    };

    Ok(assemble(caps, title_result, native_result))
}

/// [`set_process_name_blocking`] with explicit facility seams.
///
/// # Errors
///
/// [`NameError::InvalidName`] when `name` is not valid Unicode.
pub fn set_process_name_blocking_with<T, C>(
    title: &T,
    native: &C,
    name: impl AsRef<OsStr>,
) -> Result<SetOutcome, NameError>
where
    T: TitleFacility + ?Sized,
    C: CommFacility + ?Sized,
{
    let name = name.as_ref();
    let name = valid_name(name)?;
    let caps = capabilities();

    let title_result = apply_title(title, name, &caps);
    let native_result = if caps.can_set_native_name {
        let label = native_label(name);
        Some(record_native(native.set_comm_blocking(label), label))
    } else {
        None
    };

    Ok(assemble(caps, title_result, native_result))
}

// ---------------------------------------------------------------------------
// Readback
// ---------------------------------------------------------------------------

/// Read back the current generic title.
///
/// Before any setter call this is the executable's file name, when one can
/// be resolved.
#[must_use]
pub fn process_name() -> Option<String> {
    ProcessTitle.read_title()
}

/// Read back the kernel comm name. `None` on platforms without one.
#[must_use]
pub fn native_name() -> Option<String> {
    DefaultComm::default().read_comm()
}

// ---------------------------------------------------------------------------
// Mechanism steps
// ---------------------------------------------------------------------------

/// The exact label handed to the native mechanism for `name`: cut at the
/// first NUL, then truncated to at most [`COMM_LEN_MAX`] bytes on a char
/// boundary. The generic title mechanism never truncates.
#[must_use]
pub fn native_label(name: &str) -> &str {
    let name = name.split('\0').next().unwrap_or(name);
    if name.len() <= COMM_LEN_MAX {
        return name;
    }
    let mut end = COMM_LEN_MAX;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

fn valid_name(name: &OsStr) -> Result<&str, NameError> {
    name.to_str().ok_or(NameError::InvalidName)
}

fn apply_title<T>(title: &T, name: &str, caps: &CapabilitySnapshot) -> Option<bool>
where
    T: TitleFacility + ?Sized,
{
    if !caps.can_set_generic_title {
        return None;
    }
    let written = title.write_title(name).is_ok();
    let verified = written && title.read_title().as_deref() == Some(name);
    debug!(target: "nameplate", "title mechanism: written={written} verified={verified}");
    Some(verified)
}

fn record_native(status: io::Result<()>, label: &str) -> bool {
    match status {
        Ok(()) => true,
        Err(err) => {
            warn!(target: "nameplate", "native mechanism failed for {label:?}: {err}");
            false
        }
    }
}

fn assemble(
    caps: CapabilitySnapshot,
    title_result: Option<bool>,
    native_result: Option<bool>,
) -> SetOutcome {
    SetOutcome {
        overall_success: title_result == Some(true) || native_result == Some(true),
        title_result,
        native_result,
        os: caps.os,
        host: caps.host,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // ---- native_label -----------------------------------------------------

    #[test]
    fn short_names_pass_through() {
        assert_eq!(native_label("my-service"), "my-service");
        assert_eq!(native_label(""), "");
    }

    #[test]
    fn fifteen_bytes_is_the_boundary() {
        let fifteen = "a".repeat(15);
        let sixteen = "a".repeat(16);
        assert_eq!(native_label(&fifteen), fifteen.as_str());
        assert_eq!(native_label(&sixteen), fifteen.as_str());
    }

    #[test]
    fn long_names_are_cut_to_the_limit() {
        let long = "a".repeat(100);
        assert_eq!(native_label(&long).len(), COMM_LEN_MAX);
    }

    #[test]
    fn label_stops_at_the_first_nul() {
        assert_eq!(native_label("ab\0cdefghijklmnopq"), "ab");
        assert_eq!(native_label("\0abc"), "");
    }

    #[test]
    fn multibyte_names_cut_on_char_boundaries() {
        // Each 'é' is two bytes; byte 15 falls mid-char.
        let name = "é".repeat(10);
        let label = native_label(&name);
        assert_eq!(label.len(), 14);
        assert_eq!(label, "é".repeat(7));
    }

    // ---- fact table --------------------------------------------------------

    #[test]
    fn native_applies_on_linux_with_bridge_only() {
        let native = HostEnvironment::Native;
        assert!(snapshot(OperatingSystem::Linux, native).can_set_native_name);
        assert!(!snapshot(OperatingSystem::MacOs, native).can_set_native_name);
        assert!(!snapshot(OperatingSystem::Windows, native).can_set_native_name);
        assert!(!snapshot(OperatingSystem::Unknown, native).can_set_native_name);
        assert!(!snapshot(OperatingSystem::Linux, HostEnvironment::Wasm).can_set_native_name);
    }

    #[test]
    fn title_applies_everywhere() {
        for os in [
            OperatingSystem::Linux,
            OperatingSystem::MacOs,
            OperatingSystem::Windows,
            OperatingSystem::Unknown,
        ] {
            assert!(snapshot(os, HostEnvironment::Native).can_set_generic_title);
            assert!(snapshot(os, HostEnvironment::Wasm).can_set_generic_title);
        }
    }

    // ---- record assembly ---------------------------------------------------

    #[test]
    fn overall_success_is_the_or_of_true_results() {
        let caps = snapshot(OperatingSystem::Linux, HostEnvironment::Native);
        assert!(assemble(caps, Some(true), Some(false)).overall_success);
        assert!(assemble(caps, Some(false), Some(true)).overall_success);
        assert!(assemble(caps, Some(true), None).overall_success);
        assert!(!assemble(caps, Some(false), Some(false)).overall_success);
        assert!(!assemble(caps, Some(false), None).overall_success);
        assert!(!assemble(caps, None, None).overall_success);
    }

    #[test]
    fn assembled_record_echoes_detection() {
        let caps = snapshot(OperatingSystem::MacOs, HostEnvironment::Native);
        let outcome = assemble(caps, Some(true), None);
        assert_eq!(outcome.os, OperatingSystem::MacOs);
        assert_eq!(outcome.host, HostEnvironment::Native);
    }

    // ---- validation --------------------------------------------------------

    #[test]
    fn unicode_names_validate() {
        assert_eq!(valid_name(OsStr::new("fine")), Ok("fine"));
        assert_eq!(valid_name(OsStr::new("")), Ok(""));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_names_are_rejected() {
        use std::os::unix::ffi::OsStrExt;

        let bad = OsStr::from_bytes(&[0x66, 0x6f, 0xff]);
        assert_eq!(valid_name(bad), Err(NameError::InvalidName));
    }
}
