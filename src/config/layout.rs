//! Package layout: where the launcher finds its scripts and metadata
//!
//! The launcher ships inside the r2frida package:
//!
//! ```text
//! <root>/package.json   version metadata
//! <root>/r2frida.toml   optional settings
//! <root>/bin/r2frida    this executable
//! <root>/src/           node-side scripts, working directory for tools
//! ```

use crate::config::settings::Settings;
use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the package root
pub const HOME_ENV: &str = "R2FRIDA_HOME";

const PACKAGE_METADATA: &str = "package.json";
const SETTINGS_FILE: &str = "r2frida.toml";
const SOURCE_DIR: &str = "src";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct PackageMetadata {
    version: Option<String>,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the package root from `$R2FRIDA_HOME` or the executable path
    pub fn discover() -> std::io::Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|home| !home.is_empty()) {
            return Ok(Self::new(std::path::absolute(home)?));
        }

        let exe = std::env::current_exe()?;
        let bin_dir = exe.parent().unwrap_or_else(|| Path::new("."));
        let root = bin_dir.parent().unwrap_or(bin_dir);
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(PACKAGE_METADATA)
    }

    /// Make the package src/ directory the working directory
    pub fn enter_source_dir(&self) -> std::io::Result<()> {
        std::env::set_current_dir(self.source_dir())
    }

    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        Settings::load_or_default(self.settings_path())
    }

    /// Read the package version from package.json
    pub fn version(&self) -> Result<String, ConfigError> {
        let path = self.metadata_path();
        let content = fs::read_to_string(&path)?;
        let metadata: PackageMetadata =
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.clone(),
                source,
            })?;

        metadata
            .version
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVersion(path))
    }
}
