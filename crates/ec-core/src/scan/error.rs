use thiserror::Error;

use crate::scan::WorkflowState;

/// Rejections raised by the scan workflow.
///
/// These are user-input and state-violation conditions. The UI is expected to
/// avoid them by only offering the intents the current state allows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("select at least one tool")]
    NoToolsSelected,
    #[error("creative reuse is not available for hazardous items")]
    CreativeBranchUnavailable,
    #[error("a request is already in flight")]
    RequestInFlight,
    #[error("no image retained for retry")]
    NoRetainedImage,
    #[error("{remaining} step(s) remaining before the project can be finished")]
    StepsRemaining { remaining: usize },
    #[error("intent {intent} is not valid in state {state:?}")]
    InvalidTransition {
        state: WorkflowState,
        intent: &'static str,
    },
}
