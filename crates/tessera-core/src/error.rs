//! Error types for editor lifecycle and configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening an editor or setting up its render thread.
#[derive(Debug, Error)]
pub enum EditorError {
    /// `open()` was called while the editor is already rendering.
    #[error("editor is already open")]
    AlreadyOpen,

    /// `open()` was called after `close()`; closed editors are terminal.
    #[error("editor has been closed and cannot be reopened")]
    Closed,

    /// The shared windowing runtime could not be initialized.
    #[error("failed to initialize windowing runtime: {0}")]
    RuntimeInit(String),

    /// The editor's native window could not be created.
    #[error("failed to create editor window: {0}")]
    WindowCreation(String),

    /// The graphics context or GUI renderer could not be set up.
    #[error("failed to create graphics context: {0}")]
    ContextCreation(String),

    /// A native window handle of a kind this platform cannot embed into.
    #[error("unsupported window handle: {0}")]
    UnsupportedHandle(String),

    /// The operating system refused to spawn the render thread.
    #[error("failed to spawn render thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Errors that can occur while loading or saving an [`EditorConfig`](crate::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value parsed but is outside its valid range.
    #[error("invalid config value for '{field}': {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Description of why the value is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid value error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
