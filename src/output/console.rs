//! Coloured terminal messages
//!
//! Informational exits go to stdout in yellow, failures to stderr in red.

use std::io::IsTerminal;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prints `message` for an exit with `code` and returns `code`
///
/// Code 0 prints to stdout in yellow, anything else to stderr in red.
pub fn report(message: &str, code: i32) -> i32 {
    let (mut stream, color) = if code == 0 {
        (
            StandardStream::stdout(color_choice(std::io::stdout().is_terminal())),
            Color::Yellow,
        )
    } else {
        (
            StandardStream::stderr(color_choice(std::io::stderr().is_terminal())),
            Color::Red,
        )
    };

    // Nothing sensible to do if the terminal is gone
    let _ = write_colored(&mut stream, message, color);
    code
}

fn write_colored<W: WriteColor>(out: &mut W, message: &str, color: Color) -> std::io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(out, "{}", message)?;
    out.reset()?;
    writeln!(out)?;
    out.flush()
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal && std::env::var_os("NO_COLOR").is_none() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
