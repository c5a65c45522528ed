//! Standalone host harness for Tessera editors.
//!
//! Fabricates native host windows, embeds an editor in each, and keeps
//! them idling until every window has been closed.

pub mod harness;
pub mod host_window;

pub use harness::{EditorFactory, Harness, HarnessEvent, WindowId};
pub use host_window::HostWindowConfig;
