//! X11 reparenting through a dedicated Xlib display connection.

use std::os::raw::c_int;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicPtr, AtomicU8, Ordering};

use tessera_core::{EditorError, HostWindowHandle};
use x11_dl::xlib;

/// Error code recorded by [`record_error`] during a reparent.
static LAST_ERROR: AtomicU8 = AtomicU8::new(0);

/// Connection whose errors [`record_error`] records.
static REPARENT_DISPLAY: AtomicPtr<xlib::Display> = AtomicPtr::new(ptr::null_mut());

#[allow(unsafe_code)]
unsafe extern "C" fn record_error(
    display: *mut xlib::Display,
    event: *mut xlib::XErrorEvent,
) -> c_int {
    if display != REPARENT_DISPLAY.load(Ordering::Relaxed) {
        return 0;
    }
    // SAFETY: Xlib passes a valid event for the duration of the callback.
    let code = unsafe { (*event).error_code };
    LAST_ERROR.store(code, Ordering::Relaxed);
    0
}

/// Xlib entry points plus one open display.
pub struct NativeRuntime {
    xlib: xlib::Xlib,
    display: NonNull<xlib::Display>,
}

#[allow(unsafe_code)]
// SAFETY: the display is only touched through `&mut self`, and the runtime
// lives behind the shared runtime lock, so calls never overlap.
unsafe impl Send for NativeRuntime {}

impl NativeRuntime {
    /// Load libX11 and connect to `$DISPLAY`.
    pub fn open() -> Result<Self, EditorError> {
        let xlib = xlib::Xlib::open()
            .map_err(|err| EditorError::RuntimeInit(format!("cannot load libX11: {err}")))?;

        #[allow(unsafe_code)]
        // SAFETY: a null name selects the display from the environment.
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        let display = NonNull::new(display)
            .ok_or_else(|| EditorError::RuntimeInit("cannot open X display".into()))?;

        tracing::debug!("X11 display connection opened");
        Ok(Self { xlib, display })
    }

    /// Reparent `child` beneath `parent`, raise it, and flush.
    pub fn reparent(&mut self, child: HostWindowHandle, parent: HostWindowHandle) {
        if parent.is_null() {
            tracing::warn!(%child, "no host window to embed into; editor stays top-level");
            return;
        }

        let display = self.display.as_ptr();
        let child_id = child.as_raw() as xlib::Window;
        let parent_id = parent.as_raw() as xlib::Window;

        LAST_ERROR.store(0, Ordering::Relaxed);
        REPARENT_DISPLAY.store(display, Ordering::Relaxed);
        #[allow(unsafe_code)]
        // SAFETY: `display` is open for the lifetime of `self`. Bad window
        // ids raise X errors, which the temporary handler records instead of
        // exiting the process. XSync delivers them before the handler is
        // restored. Callers hold the setup lock, so no other editor swaps
        // the process-wide handler meanwhile.
        unsafe {
            let previous = (self.xlib.XSetErrorHandler)(Some(record_error));
            (self.xlib.XReparentWindow)(display, child_id, parent_id, 0, 0);
            (self.xlib.XRaiseWindow)(display, child_id);
            (self.xlib.XSync)(display, xlib::False);
            (self.xlib.XSetErrorHandler)(previous);
        }
        REPARENT_DISPLAY.store(ptr::null_mut(), Ordering::Relaxed);

        match LAST_ERROR.load(Ordering::Relaxed) {
            0 => tracing::debug!(%child, window = %parent, "editor window reparented"),
            code => tracing::warn!(
                %child,
                window = %parent,
                code,
                "X11 reparent failed; editor stays top-level"
            ),
        }
    }
}

impl Drop for NativeRuntime {
    fn drop(&mut self) {
        #[allow(unsafe_code)]
        // SAFETY: opened in `open`, closed exactly once here.
        unsafe {
            (self.xlib.XCloseDisplay)(self.display.as_ptr());
        }
        tracing::debug!("X11 display connection closed");
    }
}
