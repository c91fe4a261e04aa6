//! Device backend built on Frida's Python bindings
//!
//! Each operation runs the interpreter with a small bridge script that
//! prints its result as JSON on stdout. Toolkit exceptions go to stderr
//! with a non-zero exit status.

use crate::device::{Device, DeviceManager};
use crate::error::DeviceError;
use crate::types::{ApplicationInfo, DeviceKind, ProcessInfo};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const BRIDGE_SCRIPT: &str = r#"
import json
import sys

try:
    import frida
except ImportError as e:
    sys.stderr.write("frida python bindings not installed: %s\n" % e)
    sys.exit(2)

def main(op, kind, arg):
    if kind == "usb":
        device = frida.get_usb_device()
    else:
        device = frida.get_remote_device()
    if op == "processes":
        return [{"pid": p.pid, "name": p.name} for p in device.enumerate_processes()]
    if op == "applications":
        return [{"pid": a.pid, "name": a.name, "identifier": a.identifier}
                for a in device.enumerate_applications()]
    if op == "spawn":
        return {"pid": device.spawn([arg])}
    if op == "kill":
        device.kill(int(arg))
        return None
    raise ValueError("unknown operation " + op)

try:
    result = main(sys.argv[1], sys.argv[2], sys.argv[3] if len(sys.argv) > 3 else None)
except Exception as e:
    sys.stderr.write("%s\n" % e)
    sys.exit(1)
print(json.dumps(result))
"#;

/// Spawns bridge processes with the configured interpreter
#[derive(Debug, Clone)]
pub struct FridaBridge {
    python: String,
}

impl FridaBridge {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

impl DeviceManager for FridaBridge {
    type Device = BridgeDevice;

    async fn device(&self, kind: DeviceKind) -> Result<BridgeDevice, DeviceError> {
        Ok(BridgeDevice {
            python: self.python.clone(),
            kind,
        })
    }
}

/// Handle for one device; connects per operation
#[derive(Debug, Clone)]
pub struct BridgeDevice {
    python: String,
    kind: DeviceKind,
}

#[derive(Debug, Deserialize)]
struct SpawnReply {
    pid: u32,
}

impl BridgeDevice {
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        arg: Option<&str>,
    ) -> Result<T, DeviceError> {
        tracing::debug!(operation, device = %self.kind, "device bridge call");

        let mut command = tokio::process::Command::new(&self.python);
        command
            .arg("-c")
            .arg(BRIDGE_SCRIPT)
            .arg(operation)
            .arg(self.kind.as_str());
        if let Some(arg) = arg {
            command.arg(arg);
        }

        let output = command
            .output()
            .await
            .map_err(|source| DeviceError::Unavailable {
                program: self.python.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DeviceError::Operation {
                operation: operation.to_string(),
                message: last_line(&stderr).to_string(),
            });
        }

        decode_reply(operation, &output.stdout)
    }
}

impl Device for BridgeDevice {
    async fn enumerate_processes(&self) -> Result<Vec<ProcessInfo>, DeviceError> {
        self.call("processes", None).await
    }

    async fn enumerate_applications(&self) -> Result<Vec<ApplicationInfo>, DeviceError> {
        self.call("applications", None).await
    }

    async fn spawn(&self, program: &str) -> Result<u32, DeviceError> {
        let reply: SpawnReply = self.call("spawn", Some(program)).await?;
        Ok(reply.pid)
    }

    async fn kill(&self, pid: u32) -> Result<(), DeviceError> {
        self.call::<Option<serde_json::Value>>("kill", Some(&pid.to_string()))
            .await
            .map(|_| ())
    }
}

fn decode_reply<T: DeserializeOwned>(operation: &str, stdout: &[u8]) -> Result<T, DeviceError> {
    serde_json::from_slice(stdout).map_err(|source| DeviceError::Decode {
        operation: operation.to_string(),
        source,
    })
}

/// Python tracebacks end with the useful line
fn last_line(text: &str) -> &str {
    let line = text.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
    if line.is_empty() {
        "device backend exited with an error"
    } else {
        line.trim()
    }
}
