//! EcoCycle command-line shell.
//!
//! Wires the scan workflow from `ec-app` to the Gemini, filesystem and speech
//! adapters and drives it from a terminal.

pub mod bootstrap;
pub mod cli;
pub mod commands;

pub use bootstrap::AppRuntime;
pub use commands::{ScanCommand, ScanOutcome};
