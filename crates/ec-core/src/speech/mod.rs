//! Speech playback domain types.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

use crate::language::Language;

/// Playback state exposed to screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Monotonic identifier of one utterance; used to drop events of cancelled ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceId(pub u64);

impl Display for UtteranceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "utt-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub language: Language,
}

/// Start/end notifications from the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEvent {
    Started(UtteranceId),
    Ended(UtteranceId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("speech synthesizer unavailable: {0}")]
    Unavailable(String),
    #[error("speech synthesizer failed: {0}")]
    Failed(String),
}
