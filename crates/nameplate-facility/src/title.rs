// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process-global title register.

use crate::TitleFacility;
use std::io;
use std::sync::RwLock;

/// The one title slot for this process. The OS-visible name is global,
/// last-writer-wins state; the register mirrors that exactly.
static TITLE: RwLock<Option<String>> = RwLock::new(None);

/// Default [`TitleFacility`]: an in-process register, plus a best-effort
/// relabel of the calling thread on Linux.
///
/// Until a title is written, [`read_title`](TitleFacility::read_title)
/// reports the executable's file name — the same default a freshly started
/// process shows in a process lister.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessTitle;

impl TitleFacility for ProcessTitle {
    fn write_title(&self, title: &str) -> io::Result<()> {
        let mut slot = TITLE.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(title.to_owned());
        drop(slot);
        label_current_thread(title);
        Ok(())
    }

    fn read_title(&self) -> Option<String> {
        let slot = TITLE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(title) = slot.as_deref() {
            return Some(title.to_owned());
        }
        drop(slot);
        default_title()
    }
}

/// Title before anyone has set one: the executable's file name.
fn default_title() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    exe.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Secondary cosmetic label: keep the calling thread's kernel name in step
/// with the title. Advisory only — every failure is swallowed, and the
/// kernel truncates to its 16-byte buffer on its own.
#[cfg(target_os = "linux")]
fn label_current_thread(title: &str) {
    use std::ffi::CString;

    let Ok(label) = CString::new(title) else {
        return;
    };
    // SAFETY: PR_SET_NAME reads a NUL-terminated buffer that outlives the call.
    unsafe {
        libc::prctl(libc::PR_SET_NAME, label.as_ptr());
    }
}

#[cfg(not(target_os = "linux"))]
fn label_current_thread(_title: &str) {}
