//! Windowing/graphics backend seam.
//!
//! [`Editor`](crate::Editor) owns the lifecycle and the render thread; a
//! [`Backend`] supplies everything platform-specific that happens on that
//! thread. The GUI crate provides the real baseview/OpenGL backend; tests
//! plug in doubles that never touch a display.

use crate::error::EditorError;
use crate::runtime::{RuntimeLease, SharedRuntime};
use crate::session::RenderSession;

/// Platform backend driven from an editor's render thread.
///
/// # Render-thread protocol
///
/// For each opened editor the render thread:
///
/// 1. acquires [`shared_runtime`](Self::shared_runtime), calling
///    [`init_runtime`](Self::init_runtime) if no other editor holds it,
/// 2. calls [`run`](Self::run) with the lease and the session.
///
/// `run` takes [`RuntimeLease::lock_setup`], creates the native window and
/// its graphics context sized to `session.rect()`, embeds it beneath
/// `session.parent()`, and only then drops the setup guard. It renders
/// frames until `session.is_running()` turns `false` or the window itself
/// is closed.
/// It tears down its window and GUI context before returning, and drops
/// the lease last.
pub trait Backend: Send + Sync + 'static {
    /// Process-wide state shared by all windows of this backend.
    type Runtime: Send + 'static;

    /// The reference-counted holder of [`Self::Runtime`].
    fn shared_runtime(&self) -> &SharedRuntime<Self::Runtime>;

    /// One-time runtime setup, run by the first acquirer.
    fn init_runtime(&self) -> Result<Self::Runtime, EditorError>;

    /// Create, embed, and drive one editor window until it stops.
    ///
    /// Setup failures are returned before any frame is rendered.
    fn run(
        &self,
        runtime: RuntimeLease<Self::Runtime>,
        session: RenderSession,
    ) -> Result<(), EditorError>;
}
