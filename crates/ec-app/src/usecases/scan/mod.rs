//! Scan use cases.
//!
//! This module exposes the scan orchestrator.

mod context;
pub mod orchestrator;

pub use context::ScanContext;
pub use orchestrator::ScanOrchestrator;
