//! Platforms without an embedding implementation.

use tessera_core::{EditorError, HostWindowHandle};

/// Placeholder runtime that refuses to start.
pub struct NativeRuntime;

impl NativeRuntime {
    /// Always fails: editors cannot be embedded on this platform.
    pub fn open() -> Result<Self, EditorError> {
        Err(EditorError::RuntimeInit(
            "window embedding is not supported on this platform".into(),
        ))
    }

    /// Never reached; `open` fails first.
    pub fn reparent(&mut self, _child: HostWindowHandle, _parent: HostWindowHandle) {}
}
