//! Native window embedding.
//!
//! [`NativeRuntime`] is the process-wide windowing state shared by every
//! editor window (an X11 display connection on Linux/BSD, nothing on
//! Windows). Its `reparent` moves a freshly created editor window beneath
//! the host window. Failures there are logged and the editor keeps running
//! as a top-level window.

use raw_window_handle::RawWindowHandle;
use tessera_core::{EditorError, HostWindowHandle};

#[cfg(all(unix, not(target_os = "macos")))]
mod x11;
#[cfg(all(unix, not(target_os = "macos")))]
pub use x11::NativeRuntime;

#[cfg(windows)]
mod win32;
#[cfg(windows)]
pub use win32::NativeRuntime;

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
mod unsupported;
#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub use unsupported::NativeRuntime;

/// Extract the native window id from a raw handle.
///
/// X11 (Xlib or XCB) window ids and Win32 `HWND`s are supported.
pub fn host_handle(raw: RawWindowHandle) -> Result<HostWindowHandle, EditorError> {
    match raw {
        RawWindowHandle::Xlib(handle) => Ok(HostWindowHandle::from_raw(handle.window as usize)),
        RawWindowHandle::Xcb(handle) => Ok(HostWindowHandle::from_raw(handle.window as usize)),
        RawWindowHandle::Win32(handle) => Ok(HostWindowHandle::from_raw(handle.hwnd as usize)),
        other => Err(EditorError::UnsupportedHandle(format!("{other:?}"))),
    }
}
