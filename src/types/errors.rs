use thiserror::Error;

// === TabError ===

/// Errors related to tab/session management operations.
#[derive(Debug, Error)]
pub enum TabError {
    /// Session with the given ID was not found.
    #[error("Session not found: {0}")]
    NotFound(String),
    /// The provided tab index is out of bounds.
    #[error("Invalid tab index: {0}")]
    InvalidIndex(usize),
    /// The engine could not create a view for a new session.
    #[error("Failed to create view: {0}")]
    ViewCreation(#[from] EngineError),
}

// === EngineError ===

/// Errors reported by the embedded web engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine refused to build a view.
    #[error("Engine view build failed: {0}")]
    Build(String),
    /// A command sent to an existing view failed.
    #[error("Engine command failed: {0}")]
    Command(String),
}

// === PageIoError ===

/// Errors from reading or writing page HTML on disk.
#[derive(Debug, Error)]
pub enum PageIoError {
    /// Reading the file failed.
    #[error("{path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Writing the file failed.
    #[error("{path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// === ConfigError ===

/// Errors related to loading and saving the browser configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File system I/O error.
    #[error("Config I/O error: {0}")]
    IoError(String),
    /// JSON serialization or deserialization error.
    #[error("Config serialization error: {0}")]
    SerializationError(String),
}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// Shortcut for the given action was not found.
    #[error("Shortcut not found for action: {0}")]
    NotFound(String),
    /// The shortcut keys conflict with an existing binding.
    #[error("Shortcut conflict: {0}")]
    Conflict(String),
    /// The provided key combination is invalid.
    #[error("Invalid shortcut keys: {0}")]
    InvalidKeys(String),
}
