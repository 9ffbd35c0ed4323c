use async_trait::async_trait;

use crate::speech::{SpeechError, Utterance, UtteranceId};

/// Platform text-to-speech capability.
///
/// Implementations report [`crate::speech::SpeechEvent`]s on the channel they
/// were built with. A cancelled utterance must not report `Ended`.
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;
    async fn pause(&self, id: UtteranceId) -> Result<(), SpeechError>;
    async fn resume(&self, id: UtteranceId) -> Result<(), SpeechError>;
    async fn cancel(&self) -> Result<(), SpeechError>;
}
