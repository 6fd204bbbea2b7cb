// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]
//! Capability seams for process renaming.
//!
//! The core crate never talks to the operating system directly; every
//! rename goes through one of the two traits here. The default
//! implementations are process-backed: [`ProcessTitle`] keeps the generic
//! display title, [`KernelComm`] writes the kernel comm name on Linux.
//! Swapping in a different implementation (a mock, a recorder) changes how
//! a mechanism runs, never whether it runs — applicability is decided by
//! the dispatcher's fact table, not by the facility.

use async_trait::async_trait;
use std::io;

mod comm;
mod title;

#[cfg(target_os = "linux")]
pub use comm::KernelComm;
pub use comm::UnsupportedComm;
pub use title::ProcessTitle;

/// Comm facility wired up by default on this target.
#[cfg(target_os = "linux")]
pub type DefaultComm = KernelComm;

/// Comm facility wired up by default on this target.
#[cfg(not(target_os = "linux"))]
pub type DefaultComm = UnsupportedComm;

// ---------------------------------------------------------------------------
// Trait seams
// ---------------------------------------------------------------------------

/// Generic process-title facility: a display string associated with the
/// current process, consulted by inspection tools that ask the runtime.
///
/// Writes are verbatim — length limits and truncation belong to the native
/// mechanism, never to the title.
pub trait TitleFacility: Send + Sync {
    /// Set the title. The value is stored exactly as given.
    fn write_title(&self, title: &str) -> io::Result<()>;

    /// Read the current title back, or `None` when the facility cannot
    /// produce one.
    fn read_title(&self) -> Option<String>;
}

/// Native rename facility: the kernel-tracked short process name.
///
/// Callers hand in a label already cut to the platform limit; the facility
/// passes it through unchanged and reports the raw outcome of the write.
#[async_trait]
pub trait CommFacility: Send + Sync {
    /// Set the comm name, suspending on the underlying write.
    async fn set_comm(&self, comm: &str) -> io::Result<()>;

    /// Set the comm name without suspending.
    fn set_comm_blocking(&self, comm: &str) -> io::Result<()>;

    /// Read the current comm name back.
    fn read_comm(&self) -> Option<String>;
}
