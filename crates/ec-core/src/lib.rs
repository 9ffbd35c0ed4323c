//! # ec-core
//!
//! Core domain models and business logic for EcoCycle.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod app_dirs;
pub mod config;
pub mod disposal;
pub mod i18n;
pub mod ids;
pub mod language;
pub mod ports;
pub mod scan;
pub mod session;
pub mod speech;
pub mod stepper;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use disposal::DisposalGuide;
pub use ids::{ProductId, ScanSessionId};
pub use language::Language;
pub use scan::{
    CapturedImage, Classification, ClassificationResult, ReuseInstruction, ReuseStep, ScanAction,
    ScanError, ScanEvent, ScanNotice, ScanState, ScanStateMachine, Tool, ToolSelection,
    WorkflowState,
};
pub use session::AppSession;
pub use stepper::ReuseStepper;
