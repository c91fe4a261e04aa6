#![forbid(unsafe_code)]

//! Core domain types for the launcher
//!
//! This module defines the values that flow from argument scanning into
//! the actions: the target, the device selector and the forwarding spec.

use crate::error::UsageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to attach to, spawn or connect through
///
/// A process name, a PID, an application identifier or a connection
/// string. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    /// Creates a new Target, returning None for an empty string
    pub fn new(target: impl Into<String>) -> Option<Self> {
        let target = target.into();
        if target.is_empty() {
            return None;
        }
        Some(Target(target))
    }

    /// Returns the target as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the PID if the target is purely decimal
    pub fn as_pid(&self) -> Option<u32> {
        if !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the remote device is located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// frida-server reachable over TCP
    #[default]
    Remote,
    /// Device attached over USB
    Usb,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Remote => "remote",
            DeviceKind::Usb => "usb",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where to forward the frida-server port from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardSpec {
    /// `adb forward` on the connected Android device
    Adb,
    /// SSH tunnel to `host`, optionally on a non-default SSH port
    Ssh { host: String, port: Option<u16> },
}

impl ForwardSpec {
    /// Parses `adb`, `host:port` or `host`
    pub fn parse(spec: &str) -> Result<Self, UsageError> {
        if spec == "adb" {
            return Ok(ForwardSpec::Adb);
        }

        let invalid = || UsageError::InvalidParameter(spec.to_string());

        match spec.split_once(':') {
            Some((host, port)) => {
                if host.is_empty() {
                    return Err(invalid());
                }
                let port: u16 = port.parse().map_err(|_| invalid())?;
                if port == 0 {
                    return Err(invalid());
                }
                Ok(ForwardSpec::Ssh {
                    host: host.to_string(),
                    port: Some(port),
                })
            }
            None if spec.is_empty() => Err(invalid()),
            None => Ok(ForwardSpec::Ssh {
                host: spec.to_string(),
                port: None,
            }),
        }
    }
}

/// A process reported by the remote device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
}

/// An installed application reported by the remote device
///
/// `pid` is zero when the application is not running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub pid: u32,
    pub name: String,
    pub identifier: String,
}
