#![forbid(unsafe_code)]

//! Formatters for the process and application listings
//!
//! Rows are printed newest-first (the reverse of the order the device
//! reports them) and column-aligned for reading in a terminal.

use crate::output::columns::{LIST_COLUMN_WIDTH, align_column};
use crate::types::{ApplicationInfo, ProcessInfo};

/// Formatter for `r2frida -l`
pub struct ProcessListFormatter;

impl ProcessListFormatter {
    pub fn new() -> Self {
        ProcessListFormatter
    }

    /// Format processes as `pid name` rows
    pub fn format(&self, processes: &[ProcessInfo]) -> String {
        let mut output = String::new();
        for process in processes.iter().rev() {
            let pid = process.pid.to_string();
            output.push_str(&align_column(
                &[pid.as_str(), process.name.as_str()],
                LIST_COLUMN_WIDTH,
            ));
            output.push('\n');
        }
        output
    }

    /// Write the formatted output to stdout
    pub fn write_to_stdout(&self, processes: &[ProcessInfo]) {
        print!("{}", self.format(processes));
    }
}

impl Default for ProcessListFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Formatter for `r2frida -L`
pub struct ApplicationListFormatter;

impl ApplicationListFormatter {
    pub fn new() -> Self {
        ApplicationListFormatter
    }

    /// Format applications as `pid name identifier` rows
    pub fn format(&self, applications: &[ApplicationInfo]) -> String {
        let mut output = String::new();
        for app in applications.iter().rev() {
            let pid = app.pid.to_string();
            output.push_str(&align_column(
                &[pid.as_str(), app.name.as_str(), app.identifier.as_str()],
                LIST_COLUMN_WIDTH,
            ));
            output.push('\n');
        }
        output
    }

    /// Write the formatted output to stdout
    pub fn write_to_stdout(&self, applications: &[ApplicationInfo]) {
        print!("{}", self.format(applications));
    }
}

impl Default for ApplicationListFormatter {
    fn default() -> Self {
        Self::new()
    }
}
