//! The concrete editor: lifecycle state machine plus render-thread management.
//!
//! ```text
//!  Created ──open()──► Opened ──close()──► Closed (terminal)
//!     │                  │ ▲
//!     └──close(): no-op  │ └── idle(): refresh mirror from host
//!                        ▼
//!             render thread: acquire runtime → Backend::run → release
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::backend::Backend;
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::handle::HostWindowHandle;
use crate::host::ParameterHost;
use crate::lifecycle::EditorLifecycle;
use crate::mirror::{MIRROR_CAPACITY, ParameterMirror};
use crate::rect::Rect;
use crate::session::{CancelToken, ParamSession, RenderSession};

/// A running render thread and the means to stop it.
struct RenderTask {
    parent: HostWindowHandle,
    cancel: CancelToken,
    thread: JoinHandle<()>,
    /// Disconnects when the render thread exits (its sender is dropped).
    exited: Receiver<()>,
}

impl RenderTask {
    /// Signal the thread and wait for it, at most `timeout` if given.
    fn stop(self, timeout: Option<Duration>) {
        self.cancel.cancel();

        if let Some(timeout) = timeout {
            match self.exited.recv_timeout(timeout) {
                Err(RecvTimeoutError::Timeout) => {
                    tracing::error!(
                        window = %self.parent,
                        ?timeout,
                        "render thread did not stop in time; detaching it"
                    );
                    return;
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
            }
        }

        if self.thread.join().is_err() {
            tracing::error!(window = %self.parent, "render thread panicked");
        }
    }
}

enum EditorState {
    Created,
    Opened(RenderTask),
    Closed,
}

/// Plugin editor rendering on a dedicated thread through backend `B`.
///
/// Holds the mirrored parameter values, the reported rectangle, and, while
/// open, the render thread. Dropping an open editor closes it.
pub struct Editor<B: Backend> {
    backend: Arc<B>,
    host: Arc<dyn ParameterHost>,
    config: EditorConfig,
    rect: Rect,
    mirror: Arc<ParameterMirror>,
    state: EditorState,
}

impl<B: Backend> Editor<B> {
    /// Editor with the default configuration.
    pub fn new(host: Arc<dyn ParameterHost>, backend: Arc<B>) -> Self {
        Self::with_config(host, backend, EditorConfig::default())
    }

    /// Editor with an explicit configuration.
    ///
    /// The mirror covers `config.parameter_count` parameters (all host
    /// parameters if unset), clamped to the host count and to
    /// [`MIRROR_CAPACITY`].
    pub fn with_config(host: Arc<dyn ParameterHost>, backend: Arc<B>, config: EditorConfig) -> Self {
        let count = config
            .parameter_count
            .unwrap_or(MIRROR_CAPACITY)
            .min(host.parameter_count());
        let mirror = Arc::new(ParameterMirror::from_host(host.as_ref(), count));
        let rect = config.rect();

        Self {
            backend,
            host,
            config,
            rect,
            mirror,
            state: EditorState::Created,
        }
    }

    /// `true` while a render thread is running.
    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Opened(_))
    }

    /// `true` once the editor has been closed after opening.
    pub fn is_closed(&self) -> bool {
        matches!(self.state, EditorState::Closed)
    }

    /// The editor's parameter mirror.
    pub fn mirror(&self) -> &ParameterMirror {
        &self.mirror
    }

    /// The editor's configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
}

impl<B: Backend> EditorLifecycle for Editor<B> {
    fn rect(&self) -> Option<Rect> {
        Some(self.rect)
    }

    fn open(&mut self, parent: HostWindowHandle) -> Result<(), EditorError> {
        match self.state {
            EditorState::Created => {}
            EditorState::Opened(_) => return Err(EditorError::AlreadyOpen),
            EditorState::Closed => return Err(EditorError::Closed),
        }

        self.mirror.refresh_from(self.host.as_ref());

        let cancel = CancelToken::new();
        let session = RenderSession::new(
            parent,
            self.rect,
            self.config.clone(),
            cancel.clone(),
            ParamSession::new(Arc::clone(&self.mirror), Arc::clone(&self.host)),
        );
        let backend = Arc::clone(&self.backend);
        let (exit_tx, exited) = crossbeam_channel::bounded::<()>(1);

        let thread = thread::Builder::new()
            .name(format!("tessera-render-{parent}"))
            .spawn(move || {
                // Dropped on every exit path, including unwinding.
                let _exit = exit_tx;
                render_thread(backend.as_ref(), session);
            })
            .map_err(EditorError::Spawn)?;

        tracing::info!(window = %parent, rect = %self.rect, "editor opened");
        self.state = EditorState::Opened(RenderTask {
            parent,
            cancel,
            thread,
            exited,
        });
        Ok(())
    }

    fn idle(&mut self) {
        self.mirror.refresh_from(self.host.as_ref());
    }

    fn close(&mut self) {
        match std::mem::replace(&mut self.state, EditorState::Closed) {
            EditorState::Opened(task) => {
                let parent = task.parent;
                task.stop(self.config.close_timeout());
                tracing::info!(window = %parent, "editor closed");
            }
            other => self.state = other,
        }
    }
}

impl<B: Backend> Drop for Editor<B> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Body of the render thread.
fn render_thread<B: Backend>(backend: &B, session: RenderSession) {
    let parent = session.parent();
    let lease = match backend
        .shared_runtime()
        .acquire(|| backend.init_runtime())
    {
        Ok(lease) => lease,
        Err(err) => {
            tracing::error!(window = %parent, %err, "windowing runtime setup failed; editor will not render");
            return;
        }
    };

    match backend.run(lease, session) {
        Ok(()) => tracing::debug!(window = %parent, "render loop finished"),
        Err(err) => tracing::error!(window = %parent, %err, "editor setup failed; render loop not started"),
    }
}

/// Build a boxed editor for `host`, the way a plugin hands its editor to a host.
pub fn create_editor<B: Backend>(
    host: Arc<dyn ParameterHost>,
    backend: Arc<B>,
) -> Box<dyn EditorLifecycle> {
    Box::new(Editor::new(host, backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostStub;
    use crate::runtime::{RuntimeLease, SharedRuntime};

    /// Backend whose window is a loop that sleeps until cancelled.
    #[derive(Default)]
    struct SleepyBackend {
        runtime: SharedRuntime<()>,
    }

    impl Backend for SleepyBackend {
        type Runtime = ();

        fn shared_runtime(&self) -> &SharedRuntime<()> {
            &self.runtime
        }

        fn init_runtime(&self) -> Result<(), EditorError> {
            Ok(())
        }

        fn run(&self, _runtime: RuntimeLease<()>, session: RenderSession) -> Result<(), EditorError> {
            while session.is_running() {
                thread::sleep(Duration::from_millis(1));
            }
            Ok(())
        }
    }

    fn editor() -> Editor<SleepyBackend> {
        Editor::new(Arc::new(HostStub::new()), Arc::new(SleepyBackend::default()))
    }

    #[test]
    fn state_machine_transitions() {
        let mut editor = editor();
        assert!(!editor.is_open());

        editor.open(HostWindowHandle::from_raw(1)).unwrap();
        assert!(editor.is_open());
        assert!(matches!(
            editor.open(HostWindowHandle::from_raw(1)),
            Err(EditorError::AlreadyOpen)
        ));

        editor.close();
        assert!(editor.is_closed());
        assert!(matches!(
            editor.open(HostWindowHandle::from_raw(1)),
            Err(EditorError::Closed)
        ));

        // Idempotent.
        editor.close();
        assert!(editor.is_closed());
    }

    #[test]
    fn close_before_open_keeps_editor_usable() {
        let mut editor = editor();
        editor.close();
        assert!(!editor.is_closed());
        editor.open(HostWindowHandle::from_raw(2)).unwrap();
        editor.close();
    }

    #[test]
    fn parameter_count_is_clamped_to_host() {
        let config = EditorConfig {
            parameter_count: Some(64),
            ..EditorConfig::default()
        };
        let editor = Editor::with_config(
            Arc::new(HostStub::new()),
            Arc::new(SleepyBackend::default()),
            config,
        );
        assert_eq!(editor.mirror().len(), 8);
    }

    #[test]
    fn factory_reports_configured_rect() {
        let editor = create_editor(
            Arc::new(HostStub::new()),
            Arc::new(SleepyBackend::default()),
        );
        assert_eq!(editor.rect(), Some(Rect::from_size(800, 400)));
    }
}
