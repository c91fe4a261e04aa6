//! Test utilities for r2frida integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// A throwaway r2frida package root: package.json, src/ and r2frida.toml
pub struct PackageRoot {
    dir: TempDir,
}

impl PackageRoot {
    /// Package with the given version and an empty src/ directory
    pub fn new(version: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            format!(r#"{{"name": "r2frida", "version": "{}"}}"#, version),
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write r2frida.toml
    pub fn settings(self, toml: &str) -> Self {
        fs::write(self.dir.path().join("r2frida.toml"), toml).unwrap();
        self
    }

    /// Write a file under src/
    pub fn script(self, name: &str, content: &str) -> Self {
        fs::write(self.dir.path().join("src").join(name), content).unwrap();
        self
    }

    /// Write an executable shell script at the package root and return its path
    #[cfg(unix)]
    pub fn executable(&self, name: &str, content: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", content)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Stand-in for the Frida Python bridge
    ///
    /// Answers each operation with canned JSON and appends
    /// `<operation> <device> <argument>` to `bridge.log`. Killing PID 1 fails.
    #[cfg(unix)]
    pub fn fake_bridge(&self) -> PathBuf {
        self.executable(
            "fake-python",
            r#"echo "$3 $4 $5" >> "$(dirname "$0")/bridge.log"
case "$3" in
  processes)
    echo '[{"pid": 1, "name": "launchd"}, {"pid": 812, "name": "Safari"}]' ;;
  applications)
    echo '[{"pid": 0, "name": "Maps", "identifier": "com.apple.Maps"}, {"pid": 812, "name": "Safari", "identifier": "com.apple.mobilesafari"}]' ;;
  spawn)
    echo '{"pid": 4242}' ;;
  kill)
    if [ "$5" = 1 ]; then
      echo "Traceback (most recent call last):" >&2
      echo "frida.PermissionDeniedError: unable to kill process" >&2
      exit 1
    fi
    echo 'null' ;;
  *)
    echo "unknown operation $3" >&2
    exit 1 ;;
esac
"#,
        )
    }

    /// Lines written by `fake_bridge` so far
    pub fn bridge_log(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("bridge.log"))
            .unwrap_or_default()
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect()
    }

    /// The r2frida binary pointed at this package
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("r2frida").unwrap();
        cmd.env("R2FRIDA_HOME", self.dir.path())
            .env_remove("R2FRIDA_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}
