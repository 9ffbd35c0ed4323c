//! Scan workflow state machine.
//!
//! Defines a pure state transition function for the capture, classify and
//! branch flow. Network calls are requested through [`ScanAction`]s and their
//! outcomes are fed back as result events.

use serde::Serialize;

use crate::scan::{
    AiFailure, CapturedImage, ClassificationResult, ImageSource, InstructionRequest,
    ReuseInstruction, ScanError, ScanNotice, ToolSelection,
};
use crate::stepper::ReuseStepper;

/// Coarse workflow position, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Idle,
    Capturing,
    Classifying,
    Classified,
    GeneratingInstructions,
    ShowingSteps,
    ShowingDisposal,
}

/// Scan flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Nothing captured, or the previous scan ended.
    ///
    /// After a failed classification the image is kept so the user can retry.
    Idle {
        notice: Option<ScanNotice>,
        retained_image: Option<CapturedImage>,
    },
    /// Image is being read into memory.
    Capturing,
    /// Classification request in flight.
    Classifying { image: CapturedImage },
    /// Decision point.
    Classified {
        image: CapturedImage,
        result: ClassificationResult,
        notice: Option<ScanNotice>,
    },
    /// Instruction request in flight.
    GeneratingInstructions {
        image: CapturedImage,
        result: ClassificationResult,
        request: InstructionRequest,
    },
    /// Walking the generated steps.
    ShowingSteps {
        image: CapturedImage,
        result: ClassificationResult,
        stepper: ReuseStepper,
    },
    /// Static disposal guide.
    ShowingDisposal {
        image: CapturedImage,
        result: ClassificationResult,
    },
}

impl Default for ScanState {
    fn default() -> Self {
        ScanState::Idle {
            notice: None,
            retained_image: None,
        }
    }
}

impl ScanState {
    pub fn kind(&self) -> WorkflowState {
        match self {
            ScanState::Idle { .. } => WorkflowState::Idle,
            ScanState::Capturing => WorkflowState::Capturing,
            ScanState::Classifying { .. } => WorkflowState::Classifying,
            ScanState::Classified { .. } => WorkflowState::Classified,
            ScanState::GeneratingInstructions { .. } => WorkflowState::GeneratingInstructions,
            ScanState::ShowingSteps { .. } => WorkflowState::ShowingSteps,
            ScanState::ShowingDisposal { .. } => WorkflowState::ShowingDisposal,
        }
    }

    /// True while an image read or an AI call is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            ScanState::Capturing
                | ScanState::Classifying { .. }
                | ScanState::GeneratingInstructions { .. }
        )
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            ScanState::Classified { result, .. }
            | ScanState::GeneratingInstructions { result, .. }
            | ScanState::ShowingSteps { result, .. }
            | ScanState::ShowingDisposal { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&CapturedImage> {
        match self {
            ScanState::Idle { retained_image, .. } => retained_image.as_ref(),
            ScanState::Capturing => None,
            ScanState::Classifying { image }
            | ScanState::Classified { image, .. }
            | ScanState::GeneratingInstructions { image, .. }
            | ScanState::ShowingSteps { image, .. }
            | ScanState::ShowingDisposal { image, .. } => Some(image),
        }
    }

    pub fn notice(&self) -> Option<ScanNotice> {
        match self {
            ScanState::Idle { notice, .. } | ScanState::Classified { notice, .. } => *notice,
            _ => None,
        }
    }

    pub fn stepper(&self) -> Option<&ReuseStepper> {
        match self {
            ScanState::ShowingSteps { stepper, .. } => Some(stepper),
            _ => None,
        }
    }

    pub fn can_retry(&self) -> bool {
        matches!(
            self,
            ScanState::Idle {
                retained_image: Some(_),
                ..
            }
        )
    }
}

/// Intents and results that drive the scan flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    // User intents
    /// User picked or snapped an image.
    SelectImage { source: ImageSource },
    /// Re-run classification on the retained image.
    Retry,
    /// Creative reuse with the tools at hand.
    ChooseCreative {
        tools: ToolSelection,
        project_name: Option<String>,
    },
    ChooseDisposal,
    NextStep,
    PrevStep,
    /// Leave the last step ("project done").
    FinishProject,
    AcknowledgeDisposal,
    /// Return from a branch to the decision point.
    BackToDecision,
    /// Destructive back/cancel, from anywhere.
    Cancel,

    // Results (from orchestrator)
    ImageLoaded { image: CapturedImage },
    ImageLoadFailed,
    ClassificationSucceeded { result: ClassificationResult },
    ClassificationFailed { cause: AiFailure },
    InstructionsReady { instruction: ReuseInstruction },
    InstructionsFailed { cause: AiFailure },
}

impl ScanEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ScanEvent::SelectImage { .. } => "SelectImage",
            ScanEvent::Retry => "Retry",
            ScanEvent::ChooseCreative { .. } => "ChooseCreative",
            ScanEvent::ChooseDisposal => "ChooseDisposal",
            ScanEvent::NextStep => "NextStep",
            ScanEvent::PrevStep => "PrevStep",
            ScanEvent::FinishProject => "FinishProject",
            ScanEvent::AcknowledgeDisposal => "AcknowledgeDisposal",
            ScanEvent::BackToDecision => "BackToDecision",
            ScanEvent::Cancel => "Cancel",
            ScanEvent::ImageLoaded { .. } => "ImageLoaded",
            ScanEvent::ImageLoadFailed => "ImageLoadFailed",
            ScanEvent::ClassificationSucceeded { .. } => "ClassificationSucceeded",
            ScanEvent::ClassificationFailed { .. } => "ClassificationFailed",
            ScanEvent::InstructionsReady { .. } => "InstructionsReady",
            ScanEvent::InstructionsFailed { .. } => "InstructionsFailed",
        }
    }

    /// Intents that would start a new outstanding call.
    fn starts_request(&self) -> bool {
        matches!(
            self,
            ScanEvent::SelectImage { .. }
                | ScanEvent::Retry
                | ScanEvent::ChooseCreative { .. }
                | ScanEvent::ChooseDisposal
        )
    }
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanAction {
    /// Read the image into memory.
    LoadImage { source: ImageSource },
    /// Classify the captured image.
    Classify { image: CapturedImage },
    /// Generate a reuse blueprint.
    GenerateInstructions { request: InstructionRequest },
}

impl ScanAction {
    pub fn name(&self) -> &'static str {
        match self {
            ScanAction::LoadImage { .. } => "LoadImage",
            ScanAction::Classify { .. } => "Classify",
            ScanAction::GenerateInstructions { .. } => "GenerateInstructions",
        }
    }

    /// Actions backed by a remote call that must be guarded against stale results.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ScanAction::Classify { .. } | ScanAction::GenerateInstructions { .. }
        )
    }
}

pub type Transition = (ScanState, Vec<ScanAction>);

/// Pure scan state machine.
///
/// 纯状态机：不包含副作用。
pub struct ScanStateMachine;

impl ScanStateMachine {
    pub fn transition(state: &ScanState, event: ScanEvent) -> Result<Transition, ScanError> {
        if let ScanEvent::Cancel = event {
            return Ok((ScanState::default(), Vec::new()));
        }
        if state.is_pending() && event.starts_request() {
            return Err(ScanError::RequestInFlight);
        }

        let state_kind = state.kind();
        let intent = event.name();
        let invalid = move || ScanError::InvalidTransition {
            state: state_kind,
            intent,
        };

        match (state, event) {
            (ScanState::Idle { .. }, ScanEvent::SelectImage { source }) => Ok((
                ScanState::Capturing,
                vec![ScanAction::LoadImage { source }],
            )),
            (ScanState::Idle { retained_image, .. }, ScanEvent::Retry) => {
                let image = retained_image.clone().ok_or(ScanError::NoRetainedImage)?;
                Ok((
                    ScanState::Classifying {
                        image: image.clone(),
                    },
                    vec![ScanAction::Classify { image }],
                ))
            }

            (ScanState::Capturing, ScanEvent::ImageLoaded { image }) => Ok((
                ScanState::Classifying {
                    image: image.clone(),
                },
                vec![ScanAction::Classify { image }],
            )),
            (ScanState::Capturing, ScanEvent::ImageLoadFailed) => Ok((
                ScanState::Idle {
                    notice: Some(ScanNotice::ImageUnreadable),
                    retained_image: None,
                },
                Vec::new(),
            )),

            (ScanState::Classifying { image }, ScanEvent::ClassificationSucceeded { result }) => {
                Ok((
                    ScanState::Classified {
                        image: image.clone(),
                        result,
                        notice: None,
                    },
                    Vec::new(),
                ))
            }
            (ScanState::Classifying { image }, ScanEvent::ClassificationFailed { cause }) => Ok((
                ScanState::Idle {
                    notice: Some(ScanNotice::ClassificationFailed { cause }),
                    retained_image: Some(image.clone()),
                },
                Vec::new(),
            )),

            (
                ScanState::Classified { image, result, .. },
                ScanEvent::ChooseCreative {
                    tools,
                    project_name,
                },
            ) => {
                if !result.decision_options().creative {
                    return Err(ScanError::CreativeBranchUnavailable);
                }
                let request =
                    InstructionRequest::new(result.material_name.clone(), project_name, tools);
                Ok((
                    ScanState::GeneratingInstructions {
                        image: image.clone(),
                        result: result.clone(),
                        request: request.clone(),
                    },
                    vec![ScanAction::GenerateInstructions { request }],
                ))
            }
            (ScanState::Classified { image, result, .. }, ScanEvent::ChooseDisposal) => Ok((
                ScanState::ShowingDisposal {
                    image: image.clone(),
                    result: result.clone(),
                },
                Vec::new(),
            )),

            (
                ScanState::GeneratingInstructions { image, result, .. },
                ScanEvent::InstructionsReady { instruction },
            ) => Ok((
                ScanState::ShowingSteps {
                    image: image.clone(),
                    result: result.clone(),
                    stepper: ReuseStepper::new(instruction),
                },
                Vec::new(),
            )),
            (
                ScanState::GeneratingInstructions { image, result, .. },
                ScanEvent::InstructionsFailed { cause },
            ) => Ok((
                ScanState::Classified {
                    image: image.clone(),
                    result: result.clone(),
                    notice: Some(ScanNotice::InstructionsFailed { cause }),
                },
                Vec::new(),
            )),

            (
                ScanState::ShowingSteps {
                    image,
                    result,
                    stepper,
                },
                event @ (ScanEvent::NextStep | ScanEvent::PrevStep),
            ) => {
                let mut stepper = stepper.clone();
                if event == ScanEvent::NextStep {
                    stepper.next();
                } else {
                    stepper.prev();
                }
                Ok((
                    ScanState::ShowingSteps {
                        image: image.clone(),
                        result: result.clone(),
                        stepper,
                    },
                    Vec::new(),
                ))
            }
            (ScanState::ShowingSteps { stepper, .. }, ScanEvent::FinishProject) => {
                if !stepper.can_finish() {
                    return Err(ScanError::StepsRemaining {
                        remaining: stepper.remaining(),
                    });
                }
                Ok((ScanState::default(), Vec::new()))
            }

            (ScanState::ShowingDisposal { .. }, ScanEvent::AcknowledgeDisposal) => {
                Ok((ScanState::default(), Vec::new()))
            }

            (
                ScanState::ShowingSteps { image, result, .. }
                | ScanState::ShowingDisposal { image, result },
                ScanEvent::BackToDecision,
            ) => Ok((
                ScanState::Classified {
                    image: image.clone(),
                    result: result.clone(),
                    notice: None,
                },
                Vec::new(),
            )),

            (_, _) => Err(invalid()),
        }
    }
}
