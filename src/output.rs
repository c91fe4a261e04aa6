//! Human-readable output: column alignment, listings and coloured messages

pub mod columns;
pub mod console;
pub mod listing;

pub use columns::align_column;
pub use console::report;
pub use listing::{ApplicationListFormatter, ProcessListFormatter};
