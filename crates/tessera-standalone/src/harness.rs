//! Editor bookkeeping for the standalone host.
//!
//! The harness owns one editor per host window. Host windows live on their
//! own threads and report to the harness through [`HarnessEvent`]s; the
//! harness opens editors when their window appears, closes them when it
//! goes away, and ticks `idle()` on the rest at a fixed interval.

use std::collections::BTreeMap;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use tessera_core::{EditorError, EditorLifecycle, HostWindowHandle, Rect};

/// Harness-assigned host window id.
pub type WindowId = usize;

/// Builds a fresh, unopened editor.
pub type EditorFactory = Box<dyn Fn() -> Box<dyn EditorLifecycle>>;

/// Message from a host window thread.
#[derive(Debug)]
pub enum HarnessEvent {
    /// The host window exists and can take an editor.
    Opened {
        /// Window id.
        id: WindowId,
        /// Native handle of the host window.
        handle: HostWindowHandle,
    },
    /// The host window is closing. It stays alive until `ack` is signalled
    /// (or dropped), so the editor is closed before its parent disappears.
    Closed {
        /// Window id.
        id: WindowId,
        /// Signalled once the editor is closed.
        ack: Sender<()>,
    },
    /// The host window could not be created or has an unusable handle.
    Failed {
        /// Window id.
        id: WindowId,
        /// Why.
        error: EditorError,
    },
}

/// Owns the editors of a standalone session.
pub struct Harness {
    factory: EditorFactory,
    editors: BTreeMap<WindowId, Box<dyn EditorLifecycle>>,
}

impl Harness {
    /// Harness creating editors through `factory`.
    pub fn new(factory: impl Fn() -> Box<dyn EditorLifecycle> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            editors: BTreeMap::new(),
        }
    }

    /// Create the editor for window `id` and report the size its host
    /// window must have. `None` if the editor cannot report a rect; no
    /// editor is kept then.
    pub fn create_editor(&mut self, id: WindowId) -> Option<Rect> {
        let editor = (self.factory)();
        let Some(rect) = editor.rect() else {
            tracing::error!(id, "editor reported no rect; skipping window");
            return None;
        };
        if let Some(mut replaced) = self.editors.insert(id, editor) {
            replaced.close();
        }
        Some(rect)
    }

    /// Apply one host window event.
    pub fn handle_event(&mut self, event: HarnessEvent) {
        match event {
            HarnessEvent::Opened { id, handle } => {
                let Some(editor) = self.editors.get_mut(&id) else {
                    tracing::warn!(id, "host window opened without an editor");
                    return;
                };
                if let Err(err) = editor.open(handle) {
                    tracing::error!(id, %err, "failed to open editor");
                    self.remove(id);
                }
            }
            HarnessEvent::Closed { id, ack } => {
                self.remove(id);
                let _ = ack.send(());
            }
            HarnessEvent::Failed { id, error } => {
                tracing::error!(id, %error, "host window failed");
                self.remove(id);
            }
        }
    }

    /// Tick `idle()` on every editor.
    pub fn idle_all(&mut self) {
        for editor in self.editors.values_mut() {
            editor.idle();
        }
    }

    /// `true` once every editor has been removed.
    pub fn is_done(&self) -> bool {
        self.editors.is_empty()
    }

    /// Number of live editors.
    pub fn editor_count(&self) -> usize {
        self.editors.len()
    }

    /// Process events and idle ticks until no editors remain or every host
    /// window thread is gone. Remaining editors are closed on return.
    ///
    /// `events` is dropped on return, so host windows that outlive their
    /// editor see the send fail and skip waiting for an acknowledgement.
    pub fn run(&mut self, events: Receiver<HarnessEvent>, idle_interval: Duration) {
        let ticker = crossbeam_channel::tick(idle_interval);

        while !self.is_done() {
            crossbeam_channel::select! {
                recv(events) -> event => match event {
                    Ok(event) => self.handle_event(event),
                    Err(_) => {
                        tracing::warn!(
                            remaining = self.editor_count(),
                            "all host windows gone"
                        );
                        break;
                    }
                },
                recv(ticker) -> _ => self.idle_all(),
            }
        }

        self.close_all();
    }

    /// Close and drop every editor.
    pub fn close_all(&mut self) {
        for (id, mut editor) in std::mem::take(&mut self.editors) {
            editor.close();
            tracing::debug!(id, "editor closed at shutdown");
        }
    }

    fn remove(&mut self, id: WindowId) {
        if let Some(mut editor) = self.editors.remove(&id) {
            editor.close();
            tracing::info!(id, remaining = self.editors.len(), "editor removed");
        }
    }
}
