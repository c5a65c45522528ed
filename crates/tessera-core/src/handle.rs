//! Opaque native window handle passed from host to editor.

use core::fmt;

/// A host-owned native window, carried as an untyped pointer-sized value.
///
/// On X11 this is the window XID, on Win32 the `HWND`. The core crate never
/// dereferences it; only the platform layer in the GUI backend interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostWindowHandle(usize);

impl HostWindowHandle {
    /// Wrap a raw platform handle value.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// The raw platform handle value.
    pub const fn as_raw(self) -> usize {
        self.0
    }

    /// `true` for the null handle (no window).
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for HostWindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for HostWindowHandle {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
