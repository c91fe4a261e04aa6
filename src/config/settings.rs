//! Parsing and validation for r2frida.toml
//!
//! Every field has a default, so a missing file or an empty table yields
//! the stock setup: tools from PATH and frida-server on port 27042.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default frida-server TCP port
pub const DEFAULT_FRIDA_PORT: u16 = 27042;

/// Main settings struct for r2frida.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// External programs the launcher delegates to
    pub tools: ToolPaths,

    /// frida-server and node-side script settings
    pub frida: FridaSettings,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load settings if the file exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse settings from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.frida.port == 0 {
            return Err(ConfigError::Validation {
                field: "frida.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        let fields = [
            ("tools.r2", &self.tools.r2),
            ("tools.node", &self.tools.node),
            ("tools.adb", &self.tools.adb),
            ("tools.ssh", &self.tools.ssh),
            ("tools.python", &self.tools.python),
            ("frida.ssh_user", &self.frida.ssh_user),
            ("frida.io_script", &self.frida.io_script),
            ("frida.shell_script", &self.frida.shell_script),
            ("frida.spawn_program", &self.frida.spawn_program),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Program names or paths for delegated tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    pub r2: String,
    pub node: String,
    pub adb: String,
    pub ssh: String,
    /// Interpreter that hosts the Frida bindings for device operations
    pub python: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            r2: "r2".to_string(),
            node: "node".to_string(),
            adb: "adb".to_string(),
            ssh: "ssh".to_string(),
            python: "python3".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FridaSettings {
    /// frida-server port, used for forwarding
    pub port: u16,
    /// Login used for SSH tunnels
    pub ssh_user: String,
    /// r2pipe IO plugin script, relative to the package src/ directory
    pub io_script: String,
    /// Node shell entry point, relative to the package src/ directory
    pub shell_script: String,
    /// Executable spawned by `-S` when no application is given
    pub spawn_program: String,
}

impl Default for FridaSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_FRIDA_PORT,
            ssh_user: "root".to_string(),
            io_script: "r2io-frida.js".to_string(),
            shell_script: "main.js".to_string(),
            spawn_program: "/bin/ls".to_string(),
        }
    }
}
