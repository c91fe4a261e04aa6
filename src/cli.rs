//! Argument scanning and action dispatch

pub mod dispatch;
pub mod help;
pub mod launcher;

pub use dispatch::{Action, Flag, OPTION_TABLE, resolve, utf8_args};
pub use launcher::{Launcher, run};
