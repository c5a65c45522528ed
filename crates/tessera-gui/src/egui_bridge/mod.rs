//! Minimal egui-in-baseview bridge for embedded editor windows.
//!
//! Only the OpenGL (glow) path is supported.
//!
//! ```text
//! baseview::Window (GL context, reparented under the host window)
//!     │
//!     ▼
//! EguiWindowHandler
//!     ├── translate: baseview events → egui RawInput
//!     ├── frame loop: EguiApp::update → tessellate
//!     └── render: egui_glow::Painter → OpenGL
//! ```

mod handler;
mod translate;

pub use handler::{EguiApp, EguiWindowHandler, GlState};
pub use translate::InputState;
