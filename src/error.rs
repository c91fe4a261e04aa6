//! Error types for the r2frida launcher
//!
//! Usage errors come from argument scanning, configuration errors from the
//! package layout and `r2frida.toml`, and device errors from the remote
//! device bridge. `LauncherError` wraps all of them for the dispatcher.

use std::path::PathBuf;

/// Errors raised while scanning the argument vector
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// A token that cannot be placed (second target, flag after a target)
    #[error("Invalid parameter: '{0}'")]
    InvalidParameter(String),

    /// A flag that needs an argument was the last token
    #[error("Missing target")]
    MissingTarget,
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid r2frida.toml syntax
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid package.json
    #[error("Invalid package metadata in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Package metadata has no usable version field
    #[error("No version field in {0}")]
    MissingVersion(PathBuf),

    /// Semantically invalid configuration value
    #[error("Invalid value for {field}: {message}")]
    Validation { field: String, message: String },
}

/// Errors reported by the remote device backend
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The bridge interpreter could not be started
    #[error("Device backend unavailable ({program}): {source}")]
    Unavailable {
        program: String,
        source: std::io::Error,
    },

    /// The toolkit rejected the operation
    #[error("{operation} failed: {message}")]
    Operation { operation: String, message: String },

    /// The bridge printed something that is not the expected JSON
    #[error("Unexpected reply to {operation}: {source}")]
    Decode {
        operation: String,
        source: serde_json::Error,
    },

    /// No process on the device matches the given name
    #[error("No process named '{0}'")]
    ProcessNotFound(String),
}

/// Top-level error type for the launcher
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// A delegated tool could not be started
    #[error("Cannot run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LauncherError {
    /// Exit code used when the launcher itself fails
    pub fn exit_code(&self) -> i32 {
        1
    }
}
