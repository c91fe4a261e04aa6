//! End-to-end tests for the r2frida binary
//!
//! Each test builds a temporary package root and points the launcher at it
//! through R2FRIDA_HOME. Delegated tools are replaced with `echo`, `true`,
//! `false` or `sh` in r2frida.toml so their argument templates and exit
//! codes can be observed.

mod common;

use common::PackageRoot;
use predicates::prelude::*;

const USAGE: &str =
    "Usage: r2frida [-h|-v] [-UR] [-f adb|host:port] [-a|-k target] [-n|-s target] [-l|-L|target]";

// ============================================================================
// HELP AND VERSION
// ============================================================================

#[test]
fn test_no_arguments_prints_usage() {
    let package = PackageRoot::new("5.8.2");
    package
        .command()
        .assert()
        .success()
        .stdout(format!("{}\n", USAGE))
        .stderr("");
}

#[test]
fn test_unknown_flags_only_print_usage() {
    let package = PackageRoot::new("5.8.2");
    package
        .command()
        .args(["-x", "--debug"])
        .assert()
        .code(0)
        .stdout(format!("{}\n", USAGE));
}

#[test]
fn test_long_help_exits_one() {
    let package = PackageRoot::new("5.8.2");
    package
        .command()
        .arg("-h")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with(USAGE))
        .stderr(predicate::str::contains("-S [appname]"))
        .stderr(predicate::str::contains("remote via USB"));
}

#[test]
fn test_version_from_package_json() {
    let package = PackageRoot::new("5.8.2");
    package
        .command()
        .args(["-U", "-R", "-v"])
        .assert()
        .success()
        .stdout("5.8.2\n");
}

#[test]
fn test_version_ignores_broken_settings() {
    let package = PackageRoot::new("1.0.0").settings("this is not toml");
    package.command().arg("-v").assert().success().stdout("1.0.0\n");
}

#[test]
fn test_version_without_metadata_fails() {
    let package = PackageRoot::new("1.0.0");
    std::fs::remove_file(package.path().join("package.json")).unwrap();
    package
        .command()
        .arg("-v")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

// ============================================================================
// USAGE ERRORS
// ============================================================================

#[test]
fn test_second_target_is_invalid_parameter() {
    let package = PackageRoot::new("5.8.2");
    package
        .command()
        .args(["Safari", "Mail"])
        .assert()
        .code(1)
        .stdout("")
        .stderr("Invalid parameter: 'Mail'\n");
}

#[test]
fn test_shell_without_target() {
    let package = PackageRoot::new("5.8.2");
    for flag in ["-s", "-n"] {
        package
            .command()
            .arg(flag)
            .assert()
            .code(1)
            .stderr("Missing target\n");
    }
}

#[test]
fn test_invalid_forward_spec() {
    let package = PackageRoot::new("5.8.2");
    package
        .command()
        .args(["-f", "host:ssh"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid parameter: 'host:ssh'"));
}

#[test]
fn test_broken_settings_reported() {
    let package = PackageRoot::new("5.8.2").settings("[frida]\nport = 0\n");
    package
        .command()
        .arg("Safari")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("frida.port"));
}

// ============================================================================
// DELEGATION
// ============================================================================

#[cfg(unix)]
#[test]
fn test_bare_target_same_as_attach() {
    let package = PackageRoot::new("5.8.2").settings("[tools]\nr2 = \"echo\"\n");
    let expected = "r2pipe://node r2io-frida.js Safari\n";

    package
        .command()
        .arg("Safari")
        .assert()
        .success()
        .stdout(expected);
    package
        .command()
        .args(["-a", "Safari"])
        .assert()
        .success()
        .stdout(expected);
}

#[cfg(unix)]
#[test]
fn test_delegate_exit_code_passes_through() {
    let package = PackageRoot::new("5.8.2").settings("[tools]\nr2 = \"false\"\n");
    package.command().arg("1234").assert().code(1);
}

#[cfg(unix)]
#[test]
fn test_missing_delegate_reported() {
    let package =
        PackageRoot::new("5.8.2").settings("[tools]\nr2 = \"r2frida-no-such-radare2\"\n");
    package
        .command()
        .arg("1234")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot run 'r2frida-no-such-radare2'"));
}

#[cfg(unix)]
#[test]
fn test_shell_runs_in_package_src() {
    let package = PackageRoot::new("5.8.2")
        .settings("[tools]\nnode = \"sh\"\n")
        .script("main.js", "echo \"cwd=$(pwd -P)\"\necho \"args=$*\"\n");
    let src = package.path().join("src").canonicalize().unwrap();

    package
        .command()
        .args(["-s", "Safari"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("cwd={}", src.display())))
        .stdout(predicate::str::contains("args=Safari"));

    package
        .command()
        .args(["-n", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("args=-n 1234"));
}

#[cfg(unix)]
#[test]
fn test_forward_adb_then_attach() {
    let package =
        PackageRoot::new("5.8.2").settings("[tools]\nadb = \"echo\"\nr2 = \"echo\"\n");
    package
        .command()
        .args(["-f", "adb"])
        .assert()
        .success()
        .stdout("forward tcp:27042 tcp:27042\nr2pipe://node r2io-frida.js adb\n");
}

#[cfg(unix)]
#[test]
fn test_forward_ssh_template() {
    let package = PackageRoot::new("5.8.2").settings(
        "[tools]\nssh = \"echo\"\nr2 = \"true\"\n\n[frida]\nssh_user = \"mobile\"\n",
    );
    package
        .command()
        .args(["-f", "10.0.0.2:2222"])
        .assert()
        .success()
        .stdout("-f -N -p2222 -L 27042:localhost:27042 mobile@10.0.0.2\n");
}

#[cfg(unix)]
#[test]
fn test_forward_failure_skips_attach() {
    let package =
        PackageRoot::new("5.8.2").settings("[tools]\nssh = \"false\"\nr2 = \"echo\"\n");
    package
        .command()
        .args(["-f", "iphone.local"])
        .assert()
        .code(1)
        .stdout("");
}

// ============================================================================
// DEVICE OPERATIONS
// ============================================================================

#[test]
fn test_device_backend_failure_is_reported() {
    let package =
        PackageRoot::new("5.8.2").settings("[tools]\npython = \"r2frida-no-such-python\"\n");
    for args in [vec!["-l"], vec!["-U", "-L"], vec!["-k", "1234"]] {
        package
            .command()
            .args(&args)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Device error"))
            .stderr(predicate::str::contains("r2frida-no-such-python"));
    }
}

#[cfg(unix)]
fn bridge_package() -> PackageRoot {
    let package = PackageRoot::new("5.8.2");
    let python = package.fake_bridge();
    package.settings(&format!(
        "[tools]\npython = \"{}\"\nr2 = \"echo\"\n",
        python.display()
    ))
}

#[cfg(unix)]
#[test]
fn test_list_processes_over_usb() {
    let package = bridge_package();
    package
        .command()
        .args(["-U", "-l"])
        .assert()
        .success()
        .stdout(format!(
            "812{}Safari\n1{}launchd\n",
            " ".repeat(13),
            " ".repeat(15)
        ));
    assert_eq!(package.bridge_log(), vec!["processes usb"]);
}

#[cfg(unix)]
#[test]
fn test_list_applications_over_network() {
    let package = bridge_package();
    package
        .command()
        .arg("-L")
        .assert()
        .success()
        .stdout(format!(
            "812{}Safari{}com.apple.mobilesafari\n0{}Maps{}com.apple.Maps\n",
            " ".repeat(13),
            " ".repeat(10),
            " ".repeat(15),
            " ".repeat(12)
        ));
    assert_eq!(package.bridge_log(), vec!["applications remote"]);
}

#[cfg(unix)]
#[test]
fn test_kill_by_process_name() {
    let package = bridge_package();
    package
        .command()
        .args(["-k", "Safari"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(
        package.bridge_log(),
        vec!["processes remote", "kill remote 812"]
    );
}

#[cfg(unix)]
#[test]
fn test_kill_failure_reports_toolkit_message() {
    let package = bridge_package();
    package
        .command()
        .args(["-U", "-k", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "kill failed: frida.PermissionDeniedError: unable to kill process",
        ));
    assert_eq!(package.bridge_log(), vec!["kill usb 1"]);
}

#[cfg(unix)]
#[test]
fn test_spawn_then_attach_to_new_pid() {
    let package = bridge_package();
    package
        .command()
        .arg("-S")
        .assert()
        .success()
        .stdout("r2pipe://node r2io-frida.js 4242\n");

    package
        .command()
        .args(["-U", "-S", "/Applications/Calculator.app/Calculator"])
        .assert()
        .success()
        .stdout("r2pipe://node r2io-frida.js 4242\n");

    assert_eq!(
        package.bridge_log(),
        vec![
            "spawn remote /bin/ls",
            "spawn usb /Applications/Calculator.app/Calculator"
        ]
    );
}

// ============================================================================
// ENVIRONMENT
// ============================================================================

#[test]
fn test_missing_source_dir_is_quiet() {
    let package = PackageRoot::new("5.8.2");
    std::fs::remove_dir(package.path().join("src")).unwrap();
    package
        .command()
        .assert()
        .success()
        .stdout(format!("{}\n", USAGE))
        .stderr("");
}

#[cfg(unix)]
#[test]
fn test_non_utf8_argument_rejected() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let package = PackageRoot::new("5.8.2").settings("[tools]\nr2 = \"echo\"\n");
    package
        .command()
        .arg(OsString::from_vec(b"Saf\xffari".to_vec()))
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("Invalid parameter: 'Saf"));
}

#[cfg(unix)]
#[test]
fn test_interrupt_waits_for_delegate_status() {
    use std::process::Command;
    use std::time::Duration;

    let package = PackageRoot::new("5.8.2");
    let r2 = package.executable("fake-r2", "trap 'exit 5' INT\nsleep 2\nexit 7\n");
    let package = package.settings(&format!("[tools]\nr2 = \"{}\"\n", r2.display()));

    let mut launcher = Command::new(assert_cmd::cargo::cargo_bin("r2frida"))
        .arg("Safari")
        .env("R2FRIDA_HOME", package.path())
        .env_remove("R2FRIDA_LOG")
        .spawn()
        .unwrap();

    std::thread::sleep(Duration::from_millis(500));
    let sent = Command::new("kill")
        .args(["-INT", &launcher.id().to_string()])
        .status()
        .unwrap();
    assert!(sent.success());

    // Only the launcher was signalled, so the delegate finishes normally
    let status = launcher.wait().unwrap();
    assert_eq!(status.code(), Some(7));
}
