#![forbid(unsafe_code)]

//! r2frida: launch radare2 against processes on Frida-enabled devices
//!
//! The launcher scans a handful of flags, picks a target and a device,
//! and hands off to the tool that does the real work: radare2 with the
//! Frida IO plugin, the node shell, `adb` or `ssh`.

pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod exec;
pub mod output;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, DeviceError, LauncherError, UsageError};

// Re-export core domain types for convenient access
pub use types::{ApplicationInfo, DeviceKind, ForwardSpec, ProcessInfo, Target};
