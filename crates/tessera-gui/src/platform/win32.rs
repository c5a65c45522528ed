//! Win32 reparenting via `SetParent`.

use std::io;

use tessera_core::{EditorError, HostWindowHandle};
use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::UI::WindowsAndMessaging::SetParent;

/// Win32 needs no process-wide windowing state.
pub struct NativeRuntime;

impl NativeRuntime {
    /// Nothing to set up.
    pub fn open() -> Result<Self, EditorError> {
        Ok(Self)
    }

    /// Make `parent` the parent window of `child`.
    pub fn reparent(&mut self, child: HostWindowHandle, parent: HostWindowHandle) {
        if parent.is_null() {
            tracing::warn!(%child, "no host window to embed into; editor stays top-level");
            return;
        }

        #[allow(unsafe_code)]
        // SAFETY: both values are window handles owned by this process;
        // SetParent validates them and fails with NULL otherwise.
        let previous = unsafe { SetParent(child.as_raw() as HWND, parent.as_raw() as HWND) };

        if previous.is_null() {
            tracing::warn!(
                %child,
                window = %parent,
                error = %io::Error::last_os_error(),
                "SetParent failed; editor stays top-level"
            );
        } else {
            tracing::debug!(%child, window = %parent, "editor window reparented");
        }
    }
}
