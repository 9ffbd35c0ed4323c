//! Scan orchestrator.
//!
//! This module coordinates the scan state machine and its side effects.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use ec_core::{
    ports::{ClassifierPort, ImageSourcePort, InstructionGeneratorPort, ScanEventPort},
    scan::{
        ImageSource, ScanAction, ScanError, ScanEvent, ScanState, ScanStateMachine, Tool,
        ToolSelection, WorkflowState,
    },
    Language, ScanSessionId,
};

use crate::deps::ScanDeps;
use crate::usecases::scan::context::ScanContext;

/// Orchestrator that drives scan state and side effects.
///
/// At most one image read or AI call is outstanding. The dispatch lock is
/// released while a call runs so that `cancel` stays responsive; a completion
/// that arrives after the request token moved on is discarded.
pub struct ScanOrchestrator {
    context: Arc<ScanContext>,

    image_source: Arc<dyn ImageSourcePort>,
    classifier: Arc<dyn ClassifierPort>,
    instruction_generator: Arc<dyn InstructionGeneratorPort>,
    scan_events: Arc<dyn ScanEventPort>,
}

impl ScanOrchestrator {
    pub fn new(deps: ScanDeps, language: Language) -> Self {
        Self {
            context: ScanContext::new(ScanState::default(), language).arc(),
            image_source: deps.image_source,
            classifier: deps.classifier,
            instruction_generator: deps.instruction_generator,
            scan_events: deps.scan_events,
        }
    }

    /// Starts a new scan. A finished or settled scan is superseded.
    pub async fn capture(&self, source: ImageSource) -> Result<ScanState, ScanError> {
        let current = self.context.get_state().await;
        if matches!(
            current.kind(),
            WorkflowState::Classified | WorkflowState::ShowingSteps | WorkflowState::ShowingDisposal
        ) {
            self.dispatch(ScanEvent::Cancel).await?;
        }
        self.dispatch(ScanEvent::SelectImage { source }).await
    }

    /// Re-classifies the image retained after a failed classification.
    pub async fn retry(&self) -> Result<ScanState, ScanError> {
        self.dispatch(ScanEvent::Retry).await
    }

    /// Requests a blueprint. An empty tool set is rejected before any call.
    pub async fn choose_creative(
        &self,
        tools: impl IntoIterator<Item = Tool>,
        project_name: Option<String>,
    ) -> Result<ScanState, ScanError> {
        let tools = ToolSelection::new(tools)?;
        self.dispatch(ScanEvent::ChooseCreative {
            tools,
            project_name,
        })
        .await
    }

    pub async fn choose_disposal(&self) -> Result<ScanState, ScanError> {
        self.dispatch(ScanEvent::ChooseDisposal).await
    }

    pub async fn next_step(&self) -> Result<ScanState, ScanError> {
        self.dispatch(ScanEvent::NextStep).await
    }

    pub async fn prev_step(&self) -> Result<ScanState, ScanError> {
        self.dispatch(ScanEvent::PrevStep).await
    }

    pub async fn finish_project(&self) -> Result<ScanState, ScanError> {
        self.dispatch(ScanEvent::FinishProject).await
    }

    pub async fn acknowledge_disposal(&self) -> Result<ScanState, ScanError> {
        self.dispatch(ScanEvent::AcknowledgeDisposal).await
    }

    pub async fn back_to_decision(&self) -> Result<ScanState, ScanError> {
        self.dispatch(ScanEvent::BackToDecision).await
    }

    /// Destructive back; any in-flight result is dropped when it arrives.
    pub async fn cancel(&self) -> Result<ScanState, ScanError> {
        self.dispatch(ScanEvent::Cancel).await
    }

    /// Language used for the next AI call.
    pub async fn set_language(&self, language: Language) {
        self.context.set_language(language).await;
    }

    pub async fn language(&self) -> Language {
        self.context.language().await
    }

    pub async fn get_state(&self) -> ScanState {
        self.context.get_state().await
    }

    /// Id of the current scan, used to correlate log lines.
    pub async fn session_id(&self) -> ScanSessionId {
        self.context.session_id().await
    }

    pub async fn dispatch(&self, event: ScanEvent) -> Result<ScanState, ScanError> {
        let scan_session = self.context.session_id().await;
        let span = info_span!(
            "usecase.scan_orchestrator.dispatch",
            intent = event.name(),
            scan_session = %scan_session,
        );
        async {
            let mut pending = Some((event, None));

            while let Some((event, expected_token)) = pending.take() {
                let Some((actions, token)) = self.apply(event, expected_token).await? else {
                    break;
                };
                for action in actions {
                    if let Some(follow_up) = self.execute_action(action).await {
                        pending = Some((follow_up, Some(token)));
                    }
                }
            }

            Ok(self.context.get_state().await)
        }
        .instrument(span)
        .await
    }

    /// Runs one transition under the dispatch lock.
    ///
    /// Returns `None` when `expected_token` is stale and the event was dropped.
    async fn apply(
        &self,
        event: ScanEvent,
        expected_token: Option<u64>,
    ) -> Result<Option<(Vec<ScanAction>, u64)>, ScanError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let intent = event.name();
        if let Some(expected) = expected_token {
            let current_token = self.context.current_token();
            if expected != current_token {
                debug!(
                    intent,
                    expected, current_token, "discarding stale scan response"
                );
                return Ok(None);
            }
        }

        let current = self.context.get_state().await;
        let is_cancel = matches!(event, ScanEvent::Cancel);
        let starts_scan = matches!(event, ScanEvent::SelectImage { .. });
        let (next, actions) = ScanStateMachine::transition(&current, event).map_err(|err| {
            warn!(state = ?current.kind(), intent, error = %err, "scan intent rejected");
            err
        })?;
        info!(from = ?current.kind(), to = ?next.kind(), intent, "scan state transition");

        if starts_scan {
            let session = self.context.rotate_session().await;
            debug!(scan_session = %session, "scan session started");
        }

        let token = if is_cancel || !actions.is_empty() {
            self.context.next_token()
        } else {
            self.context.current_token()
        };
        self.context.set_state(next.clone()).await;
        self.scan_events.emit_scan_state_changed(&next).await;

        Ok(Some((actions, token)))
    }

    async fn execute_action(&self, action: ScanAction) -> Option<ScanEvent> {
        debug!(action = action.name(), "scan executing action");
        match action {
            ScanAction::LoadImage { source } => match self.image_source.load(source).await {
                Ok(image) => {
                    debug!(bytes = image.len(), mime = image.mime().as_str(), "image loaded");
                    Some(ScanEvent::ImageLoaded { image })
                }
                Err(err) => {
                    warn!(error = %err, "image could not be read");
                    Some(ScanEvent::ImageLoadFailed)
                }
            },
            ScanAction::Classify { image } => {
                let language = self.context.language().await;
                match self.classifier.classify(&image, language).await {
                    Ok(result) => {
                        info!(
                            classification = result.classification.as_str(),
                            material = %result.material_name,
                            "image classified"
                        );
                        Some(ScanEvent::ClassificationSucceeded { result })
                    }
                    Err(err) => {
                        warn!(error = %err, "classification failed");
                        Some(ScanEvent::ClassificationFailed {
                            cause: err.failure(),
                        })
                    }
                }
            }
            ScanAction::GenerateInstructions { request } => {
                let language = self.context.language().await;
                match self
                    .instruction_generator
                    .generate_instructions(&request, language)
                    .await
                {
                    Ok(instruction) => {
                        info!(
                            project = instruction.project_name(),
                            steps = instruction.len(),
                            "instructions generated"
                        );
                        Some(ScanEvent::InstructionsReady { instruction })
                    }
                    Err(err) => {
                        warn!(error = %err, "instruction generation failed");
                        Some(ScanEvent::InstructionsFailed {
                            cause: err.failure(),
                        })
                    }
                }
            }
        }
    }
}
