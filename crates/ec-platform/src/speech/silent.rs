use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use ec_core::{
    ports::SpeechSynthesizerPort,
    speech::{SpeechError, SpeechEvent, Utterance, UtteranceId},
};

/// Synthesizer used when speech is muted or no engine is configured.
///
/// Utterances are logged and reported as finished right away.
pub struct SilentSpeechSynthesizer {
    events: mpsc::UnboundedSender<SpeechEvent>,
}

impl SilentSpeechSynthesizer {
    pub fn new(events: mpsc::UnboundedSender<SpeechEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for SilentSpeechSynthesizer {
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        info!(
            utterance = %utterance.id,
            language = utterance.language.tag(),
            chars = utterance.text.chars().count(),
            "speech muted"
        );
        let _ = self.events.send(SpeechEvent::Started(utterance.id));
        let _ = self.events.send(SpeechEvent::Ended(utterance.id));
        Ok(())
    }

    async fn pause(&self, _id: UtteranceId) -> Result<(), SpeechError> {
        Ok(())
    }

    async fn resume(&self, _id: UtteranceId) -> Result<(), SpeechError> {
        Ok(())
    }

    async fn cancel(&self) -> Result<(), SpeechError> {
        Ok(())
    }
}
