//! Terminal commands.

mod progress;
pub mod scan;

pub use progress::TerminalScanEvents;
pub use scan::{ScanCommand, ScanOutcome};
