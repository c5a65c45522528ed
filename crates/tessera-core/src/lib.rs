//! Editor lifecycle and render-thread orchestration for Tessera plugin editors.
//!
//! A Tessera editor is a small immediate-mode UI that a plugin host embeds
//! into one of its own windows. This crate holds everything about that
//! editor that does not touch a display:
//!
//! - [`ParameterHost`] / [`HostStub`]: the parameter table the editor edits
//! - [`ParameterMirror`]: the editor's atomic, fixed-capacity copy of it
//! - [`EditorLifecycle`]: `rect` / `open` / `idle` / `close`
//! - [`Editor`]: the state machine and its dedicated render thread
//! - [`Backend`]: the seam to a windowing/graphics implementation
//! - [`SharedRuntime`]: reference-counted process-wide windowing state
//! - [`EditorConfig`]: TOML-backed window and lifecycle settings
//!
//! # Architecture
//!
//! ```text
//! host thread                          render thread (one per editor)
//! ───────────                          ──────────────────────────────
//! Editor::open(parent) ──spawn──────►  SharedRuntime::acquire (first: init)
//!                                      Backend::run
//! Editor::idle()                         lock setup: window, context, reparent
//!   mirror ◄── host                      loop while running:
//!                                          events → UI frame → present
//!                                          slider drag → mirror + host
//! Editor::close() ──cancel──────────►    exit loop, tear down window
//!   join (bounded)  ◄────────────────  drop lease (last: teardown)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera_core::{EditorLifecycle, HostStub, HostWindowHandle, create_editor};
//!
//! let host = Arc::new(HostStub::new());
//! let mut editor = create_editor(host, Arc::new(MyBackend::default()));
//! let rect = editor.rect().unwrap();
//! // ... host creates a window of rect.width() x rect.height() ...
//! editor.open(HostWindowHandle::from_raw(window_id))?;
//! editor.idle();
//! editor.close();
//! ```

pub mod backend;
pub mod config;
pub mod editor;
pub mod error;
pub mod handle;
pub mod host;
pub mod lifecycle;
pub mod mirror;
pub mod rect;
pub mod runtime;
pub mod session;

pub use backend::Backend;
pub use config::{EditorConfig, default_config_path, user_config_dir};
pub use editor::{Editor, create_editor};
pub use error::{ConfigError, EditorError};
pub use handle::HostWindowHandle;
pub use host::{HostStub, LABEL_LEN, PARAMETER_COUNT, ParameterHost, label_str};
pub use lifecycle::EditorLifecycle;
pub use mirror::{MIRROR_CAPACITY, ParameterMirror};
pub use rect::Rect;
pub use runtime::{RuntimeLease, RuntimeSetup, SharedRuntime};
pub use session::{CancelToken, ParamSession, RenderSession};
