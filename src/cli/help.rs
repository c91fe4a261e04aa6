//! Usage and help text

pub const SHORT_USAGE: &str =
    "Usage: r2frida [-h|-v] [-UR] [-f adb|host:port] [-a|-k target] [-n|-s target] [-l|-L|target]";

const FLAG_HELP: &[(&str, &str)] = &[
    ("-a [app|pid]", "attach (default if no flags)"),
    ("-f [adb|ip:p]", "forward port to frida-server"),
    ("-k [app|pid]", "remote kill application"),
    ("-l", "list processes"),
    ("-L", "list applications"),
    ("-n [target]", "batch mode no prompt"),
    ("-s [target]", "enter the r2node shell"),
    ("-R", "remote via TCP"),
    ("-U", "remote via USB"),
    ("-S [appname]", "spawn new app"),
    ("-v", "show version information"),
];

/// Usage line followed by one line per flag
pub fn long_help() -> String {
    let width = FLAG_HELP.iter().map(|(flag, _)| flag.len()).max().unwrap_or(0);

    let mut text = String::from(SHORT_USAGE);
    for (flag, description) in FLAG_HELP {
        text.push('\n');
        text.push_str(&format!(" {:<width$}  {}", flag, description));
    }
    text
}
