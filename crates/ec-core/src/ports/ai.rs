use async_trait::async_trait;
use thiserror::Error;

use crate::language::Language;
use crate::scan::{AiFailure, CapturedImage, ClassificationResult, InstructionRequest, ReuseInstruction};

/// Two-class failure of a remote AI call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiServiceError {
    /// Network failure, non-success status or timeout.
    #[error("ai service transport error: {0}")]
    Transport(String),
    /// Payload did not match the requested schema.
    #[error("ai service returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl AiServiceError {
    pub fn failure(&self) -> AiFailure {
        match self {
            AiServiceError::Transport(_) => AiFailure::Transport,
            AiServiceError::MalformedResponse(_) => AiFailure::MalformedResponse,
        }
    }
}

/// Classifies a captured image into one of the three dispositions.
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    async fn classify(
        &self,
        image: &CapturedImage,
        language: Language,
    ) -> Result<ClassificationResult, AiServiceError>;
}

/// Generates a step-by-step reuse blueprint.
///
/// Callers guarantee a non-empty tool set; [`InstructionRequest`] cannot be
/// built without one.
#[async_trait]
pub trait InstructionGeneratorPort: Send + Sync {
    async fn generate_instructions(
        &self,
        request: &InstructionRequest,
        language: Language,
    ) -> Result<ReuseInstruction, AiServiceError>;
}
