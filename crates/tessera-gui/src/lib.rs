//! baseview + egui backend for Tessera plugin editors.
//!
//! [`BaseviewBackend`] plugs into [`tessera_core::Editor`]: each opened
//! editor gets a native window with an OpenGL context, embedded beneath
//! the host window, drawing the [`ParameterPanel`] every frame.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera_core::{HostStub, create_editor};
//! use tessera_gui::BaseviewBackend;
//!
//! let editor = create_editor(Arc::new(HostStub::new()), Arc::new(BaseviewBackend));
//! ```

pub mod backend;
pub mod egui_bridge;
pub mod panel;
pub mod platform;
pub mod theme;
pub mod widgets;

pub use backend::{BaseviewBackend, EditorApp};
pub use panel::{ParamGroup, ParameterPanel, layout_groups};
pub use platform::{NativeRuntime, host_handle};
pub use theme::Theme;
pub use widgets::VSlider;
