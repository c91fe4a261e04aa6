//! Action execution
//!
//! `run` is the whole program: find the package, enter its `src/`
//! directory, resolve the arguments and carry out the resulting action.
//! Every path ends in an exit code; delegated tools pass theirs through.

use crate::cli::dispatch::{Action, resolve};
use crate::cli::help::{SHORT_USAGE, long_help};
use crate::config::{Layout, Settings};
use crate::device::{Device, DeviceManager, FridaBridge, find_process};
use crate::error::LauncherError;
use crate::exec::{ProcessRunner, SystemRunner, ToolCommand};
use crate::output::{ApplicationListFormatter, ProcessListFormatter, report};
use crate::types::{DeviceKind, ForwardSpec, Target};

/// Run the launcher on `args` (without the program name) and return the exit code
pub async fn run<S: AsRef<str>>(args: &[S]) -> i32 {
    let layout = match Layout::discover() {
        Ok(layout) => layout,
        Err(e) => return report(&format!("Cannot locate r2frida package: {}", e), 1),
    };

    // Installs without a package tree still get help and version
    if let Err(e) = layout.enter_source_dir() {
        tracing::debug!(
            dir = %layout.source_dir().display(),
            error = %e,
            "cannot enter package source directory"
        );
    }

    let action = match resolve(args) {
        Ok(action) => action,
        Err(e) => return report(&e.to_string(), 1),
    };
    tracing::debug!(?action, "resolved");

    let settings = if action.uses_settings() {
        match layout.load_settings() {
            Ok(settings) => settings,
            Err(e) => return report(&e.to_string(), 1),
        }
    } else {
        Settings::default()
    };

    let devices = FridaBridge::new(settings.tools.python.clone());
    let launcher = Launcher::new(layout, settings, SystemRunner, devices);

    match launcher.execute(action).await {
        Ok(code) => code,
        Err(e) => report(&e.to_string(), e.exit_code()),
    }
}

/// Carries out actions against a process runner and a device manager
pub struct Launcher<R, M> {
    layout: Layout,
    settings: Settings,
    runner: R,
    devices: M,
}

impl<R: ProcessRunner, M: DeviceManager> Launcher<R, M> {
    pub fn new(layout: Layout, settings: Settings, runner: R, devices: M) -> Self {
        Self {
            layout,
            settings,
            runner,
            devices,
        }
    }

    /// Execute `action` and return the exit code for the process
    pub async fn execute(&self, action: Action) -> Result<i32, LauncherError> {
        match action {
            Action::ShortHelp => Ok(report(SHORT_USAGE, 0)),
            Action::LongHelp => Ok(report(&long_help(), 1)),
            Action::Version => {
                let version = self.layout.version()?;
                Ok(report(&version, 0))
            }
            Action::Attach(target) => self.attach(target.as_str()).await,
            Action::Shell(target) => {
                self.runner
                    .run(&self.shell_command(&target, false))
                    .await
            }
            Action::BatchShell(target) => {
                self.runner
                    .run(&self.shell_command(&target, true))
                    .await
            }
            Action::Forward { spec, target } => self.forward(&spec, &target).await,
            Action::Kill { device, target } => self.kill(device, &target).await,
            Action::Spawn { device, app } => self.spawn_and_attach(device, app.as_ref()).await,
            Action::ListProcesses(device) => {
                let processes = self
                    .devices
                    .device(device)
                    .await?
                    .enumerate_processes()
                    .await?;
                ProcessListFormatter::new().write_to_stdout(&processes);
                Ok(0)
            }
            Action::ListApplications(device) => {
                let applications = self
                    .devices
                    .device(device)
                    .await?
                    .enumerate_applications()
                    .await?;
                ApplicationListFormatter::new().write_to_stdout(&applications);
                Ok(0)
            }
        }
    }

    /// `r2 "r2pipe://node r2io-frida.js <target>"`
    pub fn attach_command(&self, target: &str) -> ToolCommand {
        let uri = format!(
            "r2pipe://{} {} {}",
            self.settings.tools.node, self.settings.frida.io_script, target
        );
        ToolCommand::new(&self.settings.tools.r2).arg(uri)
    }

    /// `node main.js [-n] <target>`
    pub fn shell_command(&self, target: &Target, batch: bool) -> ToolCommand {
        let mut command =
            ToolCommand::new(&self.settings.tools.node).arg(&self.settings.frida.shell_script);
        if batch {
            command = command.arg("-n");
        }
        command.arg(target.as_str())
    }

    /// `adb forward` or a backgrounded `ssh -L` tunnel for the frida-server port
    pub fn forward_command(&self, spec: &ForwardSpec) -> ToolCommand {
        let port = self.settings.frida.port;
        match spec {
            ForwardSpec::Adb => ToolCommand::new(&self.settings.tools.adb).args([
                "forward".to_string(),
                format!("tcp:{}", port),
                format!("tcp:{}", port),
            ]),
            ForwardSpec::Ssh { host, port: ssh_port } => {
                let mut command = ToolCommand::new(&self.settings.tools.ssh).args(["-f", "-N"]);
                if let Some(ssh_port) = ssh_port {
                    command = command.arg(format!("-p{}", ssh_port));
                }
                command
                    .arg("-L")
                    .arg(format!("{}:localhost:{}", port, port))
                    .arg(format!("{}@{}", self.settings.frida.ssh_user, host))
            }
        }
    }

    async fn attach(&self, target: &str) -> Result<i32, LauncherError> {
        self.runner.run(&self.attach_command(target)).await
    }

    async fn forward(&self, spec: &ForwardSpec, target: &Target) -> Result<i32, LauncherError> {
        let code = self.runner.run(&self.forward_command(spec)).await?;
        if code != 0 {
            tracing::warn!(code, "port forwarding failed");
            return Ok(code);
        }
        self.attach(target.as_str()).await
    }

    async fn kill(&self, kind: DeviceKind, target: &Target) -> Result<i32, LauncherError> {
        let device = self.devices.device(kind).await?;
        let pid = match target.as_pid() {
            Some(pid) => pid,
            None => find_process(&device, target.as_str()).await?,
        };
        device.kill(pid).await?;
        tracing::info!(pid, "killed");
        Ok(0)
    }

    async fn spawn_and_attach(
        &self,
        kind: DeviceKind,
        app: Option<&Target>,
    ) -> Result<i32, LauncherError> {
        let program = app
            .map(Target::as_str)
            .unwrap_or(self.settings.frida.spawn_program.as_str());
        let device = self.devices.device(kind).await?;
        let pid = device.spawn(program).await?;
        tracing::info!(program, pid, "spawned");
        self.attach(&pid.to_string()).await
    }
}
