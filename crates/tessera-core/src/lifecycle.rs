//! The host-facing editor contract.

use crate::error::EditorError;
use crate::handle::HostWindowHandle;
use crate::rect::Rect;

/// Lifecycle every plugin editor exposes to its host.
///
/// The host asks for the [`rect`](Self::rect), creates a window of that
/// size, [`open`](Self::open)s the editor into it, calls
/// [`idle`](Self::idle) at its own cadence, and finally
/// [`close`](Self::close)s it.
pub trait EditorLifecycle: Send {
    /// Desired bounding rectangle; `None` if the editor cannot report one.
    fn rect(&self) -> Option<Rect>;

    /// Embed into `parent` and start rendering.
    fn open(&mut self, parent: HostWindowHandle) -> Result<(), EditorError>;

    /// Resynchronize displayed values with the host. Cheap and non-blocking.
    fn idle(&mut self);

    /// Stop rendering and wait for the render thread. Idempotent.
    fn close(&mut self);
}
