use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use ec_core::{
    ports::SpeechSynthesizerPort,
    speech::{SpeechError, SpeechEvent, SpeechState, Utterance, UtteranceId},
    Language,
};

#[derive(Default)]
struct PlaybackInner {
    state: SpeechState,
    current: Option<Utterance>,
    last_id: u64,
}

/// Play / pause / resume / replay over a platform synthesizer.
///
/// Every new utterance cancels the previous one first, so at most one
/// utterance is ever playing. The inner lock is held across synthesizer
/// calls to keep that ordering under concurrent callers.
pub struct SpeechPlayback {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    inner: Mutex<PlaybackInner>,
}

impl SpeechPlayback {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizerPort>) -> Self {
        Self {
            synthesizer,
            inner: Mutex::new(PlaybackInner::default()),
        }
    }

    pub async fn state(&self) -> SpeechState {
        self.inner.lock().await.state
    }

    pub async fn current(&self) -> Option<Utterance> {
        self.inner.lock().await.current.clone()
    }

    /// Cancels whatever is playing and starts `text`.
    pub async fn speak(
        &self,
        text: impl Into<String>,
        language: Language,
    ) -> Result<UtteranceId, SpeechError> {
        let mut inner = self.inner.lock().await;
        self.speak_locked(&mut inner, text.into(), language).await
    }

    /// Pauses when playing, resumes when paused, otherwise starts `text`.
    ///
    /// A paused utterance with different text or language is replaced.
    pub async fn toggle(
        &self,
        text: impl Into<String>,
        language: Language,
    ) -> Result<SpeechState, SpeechError> {
        let text = text.into();
        let mut inner = self.inner.lock().await;
        let same_utterance = inner
            .current
            .as_ref()
            .is_some_and(|u| u.text == text && u.language == language);

        match (inner.state, inner.current.as_ref().map(|u| u.id)) {
            (SpeechState::Playing, Some(id)) if same_utterance => {
                self.synthesizer.pause(id).await?;
                inner.state = SpeechState::Paused;
            }
            (SpeechState::Paused, Some(id)) if same_utterance => {
                self.synthesizer.resume(id).await?;
                inner.state = SpeechState::Playing;
            }
            _ => {
                self.speak_locked(&mut inner, text, language).await?;
            }
        }
        Ok(inner.state)
    }

    /// Restarts the current utterance from the beginning.
    pub async fn replay(&self) -> Result<Option<UtteranceId>, SpeechError> {
        let mut inner = self.inner.lock().await;
        let Some(current) = inner.current.clone() else {
            return Ok(None);
        };
        self.speak_locked(&mut inner, current.text, current.language)
            .await
            .map(Some)
    }

    /// Silences playback; used when the narrated screen goes away.
    pub async fn stop(&self) -> Result<(), SpeechError> {
        let mut inner = self.inner.lock().await;
        if inner.state != SpeechState::Idle {
            self.synthesizer.cancel().await?;
        }
        inner.state = SpeechState::Idle;
        inner.current = None;
        Ok(())
    }

    /// Applies a synthesizer notification. Events of replaced utterances are ignored.
    pub async fn on_event(&self, event: SpeechEvent) {
        let mut inner = self.inner.lock().await;
        let current_id = inner.current.as_ref().map(|u| u.id);
        match event {
            SpeechEvent::Started(id) if Some(id) == current_id => {
                if inner.state == SpeechState::Idle {
                    inner.state = SpeechState::Playing;
                }
            }
            SpeechEvent::Ended(id) if Some(id) == current_id => {
                debug!(utterance = %id, "utterance finished");
                inner.state = SpeechState::Idle;
            }
            SpeechEvent::Started(id) | SpeechEvent::Ended(id) => {
                debug!(utterance = %id, "ignoring event of replaced utterance");
            }
        }
    }

    /// Feeds synthesizer events into `on_event` until the channel closes.
    pub async fn run_event_loop(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<SpeechEvent>) {
        while let Some(event) = events.recv().await {
            self.on_event(event).await;
        }
        debug!("speech event channel closed");
    }

    async fn speak_locked(
        &self,
        inner: &mut PlaybackInner,
        text: String,
        language: Language,
    ) -> Result<UtteranceId, SpeechError> {
        if inner.state != SpeechState::Idle {
            self.synthesizer.cancel().await?;
        }
        inner.last_id += 1;
        let utterance = Utterance {
            id: UtteranceId(inner.last_id),
            text,
            language,
        };
        let id = utterance.id;
        inner.current = Some(utterance.clone());
        match self.synthesizer.speak(utterance).await {
            Ok(()) => {
                inner.state = SpeechState::Playing;
                Ok(id)
            }
            Err(err) => {
                warn!(error = %err, "speech synthesis failed to start");
                inner.state = SpeechState::Idle;
                Err(err)
            }
        }
    }
}
