//! Package layout and r2frida.toml settings

pub mod layout;
pub mod settings;

pub use layout::Layout;
pub use settings::{FridaSettings, Settings, ToolPaths};
