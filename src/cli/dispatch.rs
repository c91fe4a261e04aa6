//! Flag resolver
//!
//! Arguments are scanned left to right against a fixed option table. The
//! first terminal flag decides the action and takes the following token as
//! its argument. `-R` and `-U` only change the device selector and let the
//! scan continue, so they affect terminal flags that come after them.

use crate::error::UsageError;
use crate::types::{DeviceKind, ForwardSpec, Target};
use std::ffi::OsString;

/// Flags recognised on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    LongHelp,
    Attach,
    Spawn,
    Version,
    Shell,
    BatchShell,
    Forward,
    Kill,
    ListProcesses,
    ListApplications,
    UseRemote,
    UseUsb,
}

/// Flag string to flag mapping
pub const OPTION_TABLE: &[(&str, Flag)] = &[
    ("-h", Flag::LongHelp),
    ("-a", Flag::Attach),
    ("-S", Flag::Spawn),
    ("-v", Flag::Version),
    ("-s", Flag::Shell),
    ("-n", Flag::BatchShell),
    ("-f", Flag::Forward),
    ("-k", Flag::Kill),
    ("-l", Flag::ListProcesses),
    ("-L", Flag::ListApplications),
    ("-R", Flag::UseRemote),
    ("-U", Flag::UseUsb),
];

impl Flag {
    pub fn lookup(token: &str) -> Option<Flag> {
        OPTION_TABLE
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, flag)| *flag)
    }

    /// The device selected by `-R`/`-U`, None for terminal flags
    pub fn device_kind(self) -> Option<DeviceKind> {
        match self {
            Flag::UseRemote => Some(DeviceKind::Remote),
            Flag::UseUsb => Some(DeviceKind::Usb),
            _ => None,
        }
    }

    fn to_action(self, argument: Option<&str>, device: DeviceKind) -> Result<Action, UsageError> {
        let target = || {
            argument
                .and_then(Target::new)
                .ok_or(UsageError::MissingTarget)
        };

        let action = match self {
            Flag::LongHelp => Action::LongHelp,
            Flag::Version => Action::Version,
            Flag::Attach => Action::Attach(target()?),
            Flag::Spawn => Action::Spawn {
                device,
                app: argument.and_then(Target::new),
            },
            Flag::Shell => Action::Shell(target()?),
            Flag::BatchShell => Action::BatchShell(target()?),
            Flag::Forward => {
                let target = target()?;
                Action::Forward {
                    spec: ForwardSpec::parse(target.as_str())?,
                    target,
                }
            }
            Flag::Kill => Action::Kill {
                device,
                target: target()?,
            },
            Flag::ListProcesses => Action::ListProcesses(device),
            Flag::ListApplications => Action::ListApplications(device),
            Flag::UseRemote | Flag::UseUsb => {
                unreachable!("device selectors never end the scan")
            }
        };
        Ok(action)
    }
}

/// The single action an invocation performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// One-line usage, exit 0
    ShortHelp,
    /// Flag table, exit 1
    LongHelp,
    Version,
    /// Hand the target to radare2 through the Frida IO plugin
    Attach(Target),
    Spawn {
        device: DeviceKind,
        app: Option<Target>,
    },
    Kill {
        device: DeviceKind,
        target: Target,
    },
    ListProcesses(DeviceKind),
    ListApplications(DeviceKind),
    /// Interactive node shell
    Shell(Target),
    /// Node shell without prompt
    BatchShell(Target),
    Forward {
        spec: ForwardSpec,
        target: Target,
    },
}

impl Action {
    /// Whether the action delegates to tools configured in r2frida.toml
    pub fn uses_settings(&self) -> bool {
        !matches!(self, Action::ShortHelp | Action::LongHelp | Action::Version)
    }
}

/// Resolve the argument vector (without the program name) to an action
///
/// A terminal flag takes the following token as its argument unless that
/// token is itself in the option table: `-s -U` is a missing target, not a
/// shell on a process called `-U`.
pub fn resolve<S: AsRef<str>>(args: &[S]) -> Result<Action, UsageError> {
    let mut device = DeviceKind::default();
    let mut target: Option<Target> = None;

    for (i, token) in args.iter().enumerate() {
        let token = token.as_ref();

        if let Some(flag) = Flag::lookup(token) {
            if let Some(kind) = flag.device_kind() {
                tracing::debug!(device = %kind, "device selected");
                device = kind;
                continue;
            }
            let argument = args
                .get(i + 1)
                .map(AsRef::as_ref)
                .filter(|next| Flag::lookup(next).is_none());
            return flag.to_action(argument, device);
        }

        if target.is_some() {
            return Err(UsageError::InvalidParameter(token.to_string()));
        }

        if token.starts_with('-') {
            tracing::debug!(token, "ignoring unknown flag");
            continue;
        }

        target = Target::new(token);
    }

    Ok(match target {
        Some(target) => Action::Attach(target),
        None => Action::ShortHelp,
    })
}

/// Convert raw process arguments, rejecting any that are not valid UTF-8
pub fn utf8_args<I>(args: I) -> Result<Vec<String>, UsageError>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| UsageError::InvalidParameter(raw.to_string_lossy().into_owned()))
        })
        .collect()
}
