//! Remote device abstraction
//!
//! A `DeviceManager` hands out handles for the device selected with
//! `-R`/`-U`; the handle talks to frida-server only when an operation runs.
//! Every operation returns a `Result` so failures reach the user.

pub mod frida_bridge;

use crate::error::DeviceError;
use crate::types::{ApplicationInfo, DeviceKind, ProcessInfo};
use std::future::Future;

pub use frida_bridge::FridaBridge;

/// Process lifecycle and enumeration on a remote device
pub trait Device {
    fn enumerate_processes(&self) -> impl Future<Output = Result<Vec<ProcessInfo>, DeviceError>>;

    fn enumerate_applications(
        &self,
    ) -> impl Future<Output = Result<Vec<ApplicationInfo>, DeviceError>>;

    /// Spawn `program` suspended and return its PID
    fn spawn(&self, program: &str) -> impl Future<Output = Result<u32, DeviceError>>;

    fn kill(&self, pid: u32) -> impl Future<Output = Result<(), DeviceError>>;
}

/// Locates devices by kind
pub trait DeviceManager {
    type Device: Device;

    fn device(&self, kind: DeviceKind) -> impl Future<Output = Result<Self::Device, DeviceError>>;
}

/// Find the PID of the first process called `name`
pub async fn find_process<D: Device>(device: &D, name: &str) -> Result<u32, DeviceError> {
    device
        .enumerate_processes()
        .await?
        .into_iter()
        .find(|p| p.name == name)
        .map(|p| p.pid)
        .ok_or_else(|| DeviceError::ProcessNotFound(name.to_string()))
}
