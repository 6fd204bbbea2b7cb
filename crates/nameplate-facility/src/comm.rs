// SPDX-License-Identifier: MIT OR Apache-2.0
//! Kernel comm-name facility.

use crate::CommFacility;
use async_trait::async_trait;
use std::io;

#[cfg(target_os = "linux")]
const COMM_PATH: &str = "/proc/self/comm";

/// Linux comm facility backed by the process filesystem.
///
/// Writing `/proc/self/comm` renames the thread-group leader regardless of
/// which thread performs the write, so the suspension-capable path may run
/// it on a worker thread without changing what `ps` reports.
#[cfg(target_os = "linux")]
#[derive(Debug, Default, Clone, Copy)]
pub struct KernelComm;

#[cfg(target_os = "linux")]
#[async_trait]
impl CommFacility for KernelComm {
    async fn set_comm(&self, comm: &str) -> io::Result<()> {
        tokio::fs::write(COMM_PATH, comm).await?;
        tracing::debug!(target: "nameplate", "kernel comm set to {comm:?}");
        Ok(())
    }

    fn set_comm_blocking(&self, comm: &str) -> io::Result<()> {
        std::fs::write(COMM_PATH, comm)?;
        tracing::debug!(target: "nameplate", "kernel comm set to {comm:?}");
        Ok(())
    }

    fn read_comm(&self) -> Option<String> {
        let raw = std::fs::read_to_string(COMM_PATH).ok()?;
        Some(raw.trim_end_matches('\n').to_owned())
    }
}

/// Comm facility for targets without a native rename mechanism.
///
/// The dispatcher rules the native mechanism out from its fact table before
/// ever reaching a facility, so these methods are not called in normal
/// operation; they exist to keep the seam total on every target.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedComm;

#[async_trait]
impl CommFacility for UnsupportedComm {
    async fn set_comm(&self, _comm: &str) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }

    fn set_comm_blocking(&self, _comm: &str) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }

    fn read_comm(&self) -> Option<String> {
        None
    }
}
