use serde::Serialize;

/// Failure class of an AI call, as surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AiFailure {
    Transport,
    MalformedResponse,
}

/// User-visible notice attached to a stable state after a recovered failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanNotice {
    ImageUnreadable,
    ClassificationFailed { cause: AiFailure },
    InstructionsFailed { cause: AiFailure },
}
