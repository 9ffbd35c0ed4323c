//! Scan workflow domain: captured images, classification, blueprints and the
//! state machine tying them together.

mod classification;
mod error;
mod image;
mod instruction;
mod notice;
mod state_machine;
mod tool;

pub use classification::{Classification, ClassificationResult, DecisionOptions, Suggestion};
pub use error::ScanError;
pub use image::{CaptureError, CapturedImage, ImageMime, ImageSource};
pub use instruction::{
    InstructionError, InstructionRequest, ReuseInstruction, ReuseStep, StepDraft,
    DEFAULT_PROJECT_NAME,
};
pub use notice::{AiFailure, ScanNotice};
pub use state_machine::{
    ScanAction, ScanEvent, ScanState, ScanStateMachine, Transition, WorkflowState,
};
pub use tool::{Tool, ToolPicker, ToolSelection};
