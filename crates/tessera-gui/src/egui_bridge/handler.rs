//! Baseview [`WindowHandler`] that runs an egui app on an OpenGL context.
//!
//! Every `on_frame` call is one complete egui frame:
//!
//! 1. Close the window if the app asks to stop
//! 2. Run the egui pass (the app draws its UI)
//! 3. Tessellate and paint through `egui_glow::Painter`
//! 4. Swap buffers

use std::sync::Arc;

use baseview::{Event, EventStatus, Window, WindowHandler};
use egui::Context;
use glow::HasContext;
use tessera_core::EditorError;

use super::translate::InputState;

/// UI driven by an [`EguiWindowHandler`].
pub trait EguiApp: Send + 'static {
    /// One-time setup on the fresh context (fonts, theme).
    fn setup(&mut self, _ctx: &Context) {}

    /// Draw one frame.
    fn update(&mut self, ctx: &Context);

    /// `false` closes the window before the next frame is drawn.
    fn is_running(&self) -> bool {
        true
    }
}

/// GL function table and the egui renderer bound to it.
pub struct GlState {
    gl: Arc<glow::Context>,
    painter: egui_glow::Painter,
}

impl GlState {
    /// Load GL entry points from the window's context and build a painter.
    ///
    /// Leaves the context current on the calling thread.
    pub fn new(window: &mut Window<'_>) -> Result<Self, EditorError> {
        let context = window
            .gl_context()
            .ok_or_else(|| EditorError::ContextCreation("window has no OpenGL context".into()))?;

        #[allow(unsafe_code)]
        // SAFETY: the context belongs to this window and is only used from
        // the window's own thread. It outlives the loaded function table,
        // which is dropped with the handler before the window is destroyed.
        let gl = unsafe {
            context.make_current();
            Arc::new(glow::Context::from_loader_function(|symbol| {
                context.get_proc_address(symbol)
            }))
        };

        let painter = egui_glow::Painter::new(Arc::clone(&gl), "", None, false)
            .map_err(|err| EditorError::ContextCreation(err.to_string()))?;

        Ok(Self { gl, painter })
    }
}

/// Drives an [`EguiApp`] inside one baseview window.
///
/// Without a [`GlState`] (setup failed) the handler closes its window on
/// the first frame.
pub struct EguiWindowHandler<A: EguiApp> {
    ctx: Context,
    gl: Option<GlState>,
    input: InputState,
    clear_color: [f32; 4],
    app: A,
}

impl<A: EguiApp> EguiWindowHandler<A> {
    /// Wrap `app`, running its one-time setup.
    pub fn new(
        gl: Option<GlState>,
        mut app: A,
        physical_size: [u32; 2],
        scale: f64,
        clear_color: [f32; 4],
    ) -> Self {
        let ctx = Context::default();
        app.setup(&ctx);
        Self {
            ctx,
            gl,
            input: InputState::new(physical_size, scale),
            clear_color,
            app,
        }
    }
}

impl<A: EguiApp> WindowHandler for EguiWindowHandler<A> {
    fn on_frame(&mut self, window: &mut Window<'_>) {
        if !self.app.is_running() {
            window.close();
            return;
        }
        let Some(state) = &mut self.gl else {
            window.close();
            return;
        };
        let Some(context) = window.gl_context() else {
            return;
        };

        #[allow(unsafe_code)]
        // SAFETY: the window's own context, bound on the window's thread.
        unsafe {
            context.make_current();
        }

        let raw_input = self.input.take();
        let output = self.ctx.run(raw_input, |ctx| self.app.update(ctx));
        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);

        let [width, height] = self.input.physical_size();
        let [r, g, b, a] = self.clear_color;
        #[allow(unsafe_code)]
        // SAFETY: plain state calls on the context made current above.
        unsafe {
            state.gl.viewport(0, 0, width as i32, height as i32);
            state.gl.clear_color(r, g, b, a);
            state.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        state.painter.paint_and_update_textures(
            [width, height],
            output.pixels_per_point,
            &primitives,
            &output.textures_delta,
        );

        context.swap_buffers();
    }

    fn on_event(&mut self, _window: &mut Window<'_>, event: Event) -> EventStatus {
        match event {
            Event::Mouse(mouse) => {
                self.input.on_mouse(&mouse);
                if self.ctx.wants_pointer_input() {
                    EventStatus::Captured
                } else {
                    EventStatus::Ignored
                }
            }
            Event::Keyboard(key) => {
                self.input.on_modifiers(key.modifiers);
                EventStatus::Ignored
            }
            Event::Window(window_event) => {
                if self.input.on_window(&window_event) {
                    tracing::debug!("editor window closing");
                }
                EventStatus::Captured
            }
        }
    }
}

impl<A: EguiApp> Drop for EguiWindowHandler<A> {
    fn drop(&mut self) {
        if let Some(gl) = &mut self.gl {
            gl.painter.destroy();
        }
    }
}
