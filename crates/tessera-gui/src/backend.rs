//! The baseview/OpenGL editor backend.
//!
//! Each render thread takes the shared runtime's setup lock, opens a
//! baseview window with a GL 3.2 context, reparents it beneath the host
//! window, releases the lock, and runs [`EditorApp`] until the editor is closed. The window's
//! event loop blocks the render thread for the window's whole lifetime.

use std::sync::LazyLock;

use baseview::gl::GlConfig;
use baseview::{Size, Window, WindowOpenOptions, WindowScalePolicy};
use egui::Context;
use raw_window_handle::HasRawWindowHandle;
use tessera_core::{
    Backend, EditorError, HostWindowHandle, RenderSession, RuntimeLease, RuntimeSetup,
    SharedRuntime,
};

use crate::egui_bridge::{EguiApp, EguiWindowHandler, GlState};
use crate::panel::ParameterPanel;
use crate::platform::{self, NativeRuntime};
use crate::theme::Theme;

static NATIVE_RUNTIME: LazyLock<SharedRuntime<NativeRuntime>> = LazyLock::new(SharedRuntime::new);

/// Backend rendering editors in native baseview windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseviewBackend;

impl Backend for BaseviewBackend {
    type Runtime = NativeRuntime;

    fn shared_runtime(&self) -> &SharedRuntime<NativeRuntime> {
        &NATIVE_RUNTIME
    }

    fn init_runtime(&self) -> Result<NativeRuntime, EditorError> {
        NativeRuntime::open()
    }

    fn run(
        &self,
        runtime: RuntimeLease<NativeRuntime>,
        session: RenderSession,
    ) -> Result<(), EditorError> {
        let rect = session.rect();
        if rect.is_empty() {
            return Err(EditorError::WindowCreation(format!(
                "editor rect {rect} has no area"
            )));
        }
        let config = session.config();
        let scale = config.scale;
        let clear_color = config.clear_color;
        let options = WindowOpenOptions {
            title: config.title.clone(),
            size: Size::new(f64::from(rect.width()), f64::from(rect.height())),
            scale: WindowScalePolicy::ScaleFactor(scale),
            gl_config: Some(GlConfig {
                version: (3, 2),
                ..GlConfig::default()
            }),
        };
        let physical_size = [
            (f64::from(rect.width()) * scale) as u32,
            (f64::from(rect.height()) * scale) as u32,
        ];

        let (failure_tx, failure_rx) = crossbeam_channel::bounded(1);

        // Held from before window and context creation until the window is
        // reparented; other render threads wait in `acquire`/`lock_setup`.
        let pending = PendingWindow {
            setup: runtime.lock_setup(),
            runtime,
            session,
        };

        Window::open_blocking(options, move |window: &mut Window<'_>| {
            let mut pending = pending;
            let gl = embed(&mut pending.setup, window, pending.session.parent());
            let PendingWindow {
                setup,
                runtime,
                session,
            } = pending;
            drop(setup);

            let gl = match gl {
                Ok(gl) => Some(gl),
                Err(err) => {
                    let _ = failure_tx.send(err);
                    None
                }
            };

            let app = EditorApp::new(session, runtime);
            EguiWindowHandler::new(gl, app, physical_size, scale, clear_color)
        });

        match failure_rx.try_recv() {
            Ok(err) => Err(err),
            Err(_) => Ok(()),
        }
    }
}

/// Everything the window builder callback takes over.
///
/// Fields drop in order, so the setup guard is always released before the
/// lease, even if the callback unwinds or never runs.
struct PendingWindow {
    setup: RuntimeSetup<NativeRuntime>,
    runtime: RuntimeLease<NativeRuntime>,
    session: RenderSession,
}

/// Per-window setup, run while the shared runtime's setup lock is held.
fn embed(
    setup: &mut RuntimeSetup<NativeRuntime>,
    window: &mut Window<'_>,
    parent: HostWindowHandle,
) -> Result<GlState, EditorError> {
    let native = setup
        .runtime()
        .ok_or_else(|| EditorError::RuntimeInit("windowing runtime is gone".into()))?;
    let child = platform::host_handle(window.raw_window_handle())?;
    let gl = GlState::new(window)?;
    native.reparent(child, parent);
    Ok(gl)
}

/// The editor UI running inside one window.
///
/// Owns the runtime lease, so the shared runtime is released only after
/// the window's GL state has been torn down.
pub struct EditorApp {
    session: RenderSession,
    panel: ParameterPanel,
    _runtime: RuntimeLease<NativeRuntime>,
}

impl EditorApp {
    fn new(session: RenderSession, runtime: RuntimeLease<NativeRuntime>) -> Self {
        let panel = ParameterPanel::new(session.params(), Theme::default());
        Self {
            session,
            panel,
            _runtime: runtime,
        }
    }
}

impl EguiApp for EditorApp {
    fn setup(&mut self, ctx: &Context) {
        self.panel.theme().apply(ctx);
    }

    fn update(&mut self, ctx: &Context) {
        self.panel.show(ctx, self.session.params());
    }

    fn is_running(&self) -> bool {
        self.session.is_running()
    }
}
