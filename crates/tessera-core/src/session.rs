//! State handed from an opening editor to its render thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::EditorConfig;
use crate::handle::HostWindowHandle;
use crate::host::{LABEL_LEN, ParameterHost, label_str};
use crate::mirror::ParameterMirror;
use crate::rect::Rect;

/// Cooperative stop signal shared by the host thread and one render thread.
///
/// The host thread calls [`cancel`](Self::cancel); the render loop polls
/// [`is_cancelled`](Self::is_cancelled) once per frame. There is no other
/// way to interrupt a render thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the render loop to stop.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Render-thread view of the parameters: the mirror plus the host behind it.
///
/// Widgets read through [`value`](Self::value) and report user edits through
/// [`write`](Self::write), which updates the mirror and forwards the value
/// to the host in one step.
#[derive(Clone)]
pub struct ParamSession {
    mirror: Arc<ParameterMirror>,
    host: Arc<dyn ParameterHost>,
}

impl ParamSession {
    /// Bind a mirror to the host it mirrors.
    pub fn new(mirror: Arc<ParameterMirror>, host: Arc<dyn ParameterHost>) -> Self {
        Self { mirror, host }
    }

    /// Number of parameters the UI should show.
    pub fn len(&self) -> usize {
        self.mirror.len()
    }

    /// `true` if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.mirror.is_empty()
    }

    /// Mirrored value, or `0.0` past the end.
    pub fn value(&self, index: usize) -> f32 {
        self.mirror.get(index).unwrap_or(0.0)
    }

    /// Parameter label as reported by the host, `""` past the end.
    pub fn name(&self, index: usize) -> String {
        if index >= self.len() {
            return String::new();
        }
        let mut text = [0u8; LABEL_LEN];
        self.host.get_parameter_name(index, &mut text);
        label_str(&text).to_owned()
    }

    /// Apply a user edit: store in the mirror and propagate to the host.
    ///
    /// Out-of-range indices are ignored.
    pub fn write(&self, index: usize, value: f32) {
        if index >= self.len() {
            return;
        }
        self.mirror.set(index, value);
        self.host.set_parameter_automated(index, value);
    }

    /// The underlying mirror.
    pub fn mirror(&self) -> &ParameterMirror {
        &self.mirror
    }
}

/// Everything a backend needs to run one editor window.
///
/// Created by [`Editor::open`](crate::Editor) and moved onto the render
/// thread. Dropped when the render loop exits.
pub struct RenderSession {
    parent: HostWindowHandle,
    rect: Rect,
    config: EditorConfig,
    cancel: CancelToken,
    params: ParamSession,
}

impl RenderSession {
    /// Assemble a session.
    pub fn new(
        parent: HostWindowHandle,
        rect: Rect,
        config: EditorConfig,
        cancel: CancelToken,
        params: ParamSession,
    ) -> Self {
        Self {
            parent,
            rect,
            config,
            cancel,
            params,
        }
    }

    /// Host window to embed into.
    pub fn parent(&self) -> HostWindowHandle {
        self.parent
    }

    /// Size the editor window must have.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Editor configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Parameter access for the UI.
    pub fn params(&self) -> &ParamSession {
        &self.params
    }

    /// `false` once the host has asked the editor to close.
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostStub;

    fn session() -> (ParamSession, Arc<HostStub>) {
        let host = Arc::new(HostStub::new());
        let mirror = Arc::new(ParameterMirror::from_host(host.as_ref(), 8));
        (ParamSession::new(mirror, host.clone()), host)
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn write_updates_mirror_and_host() {
        let (params, host) = session();
        params.write(3, 0.75);
        assert_eq!(params.value(3), 0.75);
        assert_eq!(host.get_parameter(3), 0.75);
    }

    #[test]
    fn write_past_end_is_ignored() {
        let (params, _host) = session();
        // Would panic inside the host if forwarded.
        params.write(8, 0.5);
        assert_eq!(params.value(8), 0.0);
        assert_eq!(params.name(8), "");
    }

    #[test]
    fn names_come_from_host_labels() {
        let (params, _host) = session();
        assert_eq!(params.name(0), "Cutoff");
        assert_eq!(params.name(5), "Release");
    }

    #[test]
    fn render_session_reports_running_until_cancelled() {
        let (params, _host) = session();
        let cancel = CancelToken::new();
        let session = RenderSession::new(
            HostWindowHandle::from_raw(42),
            Rect::from_size(10, 10),
            EditorConfig::default(),
            cancel.clone(),
            params,
        );
        assert!(session.is_running());
        assert_eq!(session.parent().as_raw(), 42);
        cancel.cancel();
        assert!(!session.is_running());
    }
}
