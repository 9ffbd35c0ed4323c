use std::process::Stdio;

use async_trait::async_trait;
use tokio::{
    process::Command,
    sync::{mpsc, oneshot, Mutex},
};
use tracing::{debug, warn};

use ec_core::{
    ports::SpeechSynthesizerPort,
    speech::{SpeechError, SpeechEvent, Utterance, UtteranceId},
};

/// Placeholder replaced by the utterance's BCP-47 voice tag.
const VOICE_PLACEHOLDER: &str = "{voice}";
/// Placeholder replaced by the utterance text.
const TEXT_PLACEHOLDER: &str = "{text}";

struct Running {
    id: UtteranceId,
    kill: oneshot::Sender<()>,
}

#[derive(Default)]
struct CommandState {
    running: Option<Running>,
    /// Last spoken utterance; kept while paused so it can be restarted.
    current: Option<Utterance>,
}

/// Speaks by spawning an external TTS program (`espeak-ng`, `say`, ...).
///
/// One child process per utterance. Pausing kills the child and keeps the
/// utterance so that `resume` can restart it from the beginning; command
/// line engines cannot continue mid-sentence. A killed child never reports
/// [`SpeechEvent::Ended`].
pub struct CommandSpeechSynthesizer {
    program: String,
    args: Vec<String>,
    events: mpsc::UnboundedSender<SpeechEvent>,
    state: Mutex<CommandState>,
}

impl CommandSpeechSynthesizer {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        events: mpsc::UnboundedSender<SpeechEvent>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            events,
            state: Mutex::new(CommandState::default()),
        }
    }

    fn render_args(&self, utterance: &Utterance) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                arg.replace(VOICE_PLACEHOLDER, utterance.language.speech_tag())
                    .replace(TEXT_PLACEHOLDER, &utterance.text)
            })
            .collect()
    }

    fn spawn(&self, utterance: &Utterance) -> Result<Running, SpeechError> {
        let mut child = Command::new(&self.program)
            .args(self.render_args(utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Unavailable(format!("{}: {e}", self.program)))?;

        let id = utterance.id;
        let (kill_tx, kill_rx) = oneshot::channel::<()>();
        let events = self.events.clone();
        let _ = events.send(SpeechEvent::Started(id));

        tokio::spawn(async move {
            let finished = tokio::select! {
                status = child.wait() => Some(status),
                _ = kill_rx => None,
            };
            match finished {
                Some(Ok(status)) => {
                    if !status.success() {
                        warn!(utterance = %id, %status, "speech program exited with failure");
                    }
                    let _ = events.send(SpeechEvent::Ended(id));
                }
                Some(Err(err)) => {
                    warn!(utterance = %id, error = %err, "waiting on speech program failed");
                    let _ = events.send(SpeechEvent::Ended(id));
                }
                None => {
                    if let Err(err) = child.kill().await {
                        debug!(utterance = %id, error = %err, "speech program already gone");
                    }
                }
            }
        });

        Ok(Running { id, kill: kill_tx })
    }

    fn stop_running(state: &mut CommandState) {
        if let Some(running) = state.running.take() {
            debug!(utterance = %running.id, "stopping speech program");
            let _ = running.kill.send(());
        }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for CommandSpeechSynthesizer {
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let mut state = self.state.lock().await;
        Self::stop_running(&mut state);
        state.current = None;
        state.running = Some(self.spawn(&utterance)?);
        state.current = Some(utterance);
        Ok(())
    }

    async fn pause(&self, id: UtteranceId) -> Result<(), SpeechError> {
        let mut state = self.state.lock().await;
        match state.running.as_ref() {
            Some(running) if running.id == id => {
                Self::stop_running(&mut state);
                Ok(())
            }
            _ => Err(SpeechError::Failed(format!("{id} is not playing"))),
        }
    }

    async fn resume(&self, id: UtteranceId) -> Result<(), SpeechError> {
        let mut state = self.state.lock().await;
        if state.running.is_some() {
            return Err(SpeechError::Failed(format!("{id} is not paused")));
        }
        let utterance = match state.current.as_ref() {
            Some(utterance) if utterance.id == id => utterance.clone(),
            _ => return Err(SpeechError::Failed(format!("{id} is not paused"))),
        };
        state.running = Some(self.spawn(&utterance)?);
        Ok(())
    }

    async fn cancel(&self) -> Result<(), SpeechError> {
        let mut state = self.state.lock().await;
        Self::stop_running(&mut state);
        state.current = None;
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use ec_core::Language;
    use std::time::Duration;
    use tokio::time::timeout;

    fn utterance(id: u64, text: &str) -> Utterance {
        Utterance {
            id: UtteranceId(id),
            text: text.to_string(),
            language: Language::Ta,
        }
    }

    fn sh(script: &str, tx: mpsc::UnboundedSender<SpeechEvent>) -> CommandSpeechSynthesizer {
        CommandSpeechSynthesizer::new("sh", vec!["-c".into(), script.into()], tx)
    }

    #[tokio::test]
    async fn finished_program_reports_end() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let synth = sh("exit 0", tx);
        synth.speak(utterance(1, "hi")).await.unwrap();

        assert_eq!(rx.recv().await, Some(SpeechEvent::Started(UtteranceId(1))));
        let ended = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
        assert_eq!(ended, Some(SpeechEvent::Ended(UtteranceId(1))));
    }

    #[tokio::test]
    async fn cancelled_program_does_not_report_end() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let synth = sh("sleep 30", tx);
        synth.speak(utterance(1, "long")).await.unwrap();
        assert_eq!(rx.recv().await, Some(SpeechEvent::Started(UtteranceId(1))));

        synth.cancel().await.unwrap();
        let next = timeout(Duration::from_millis(300), rx.recv()).await;
        assert!(next.is_err(), "no event expected after cancel, got {next:?}");
    }

    #[tokio::test]
    async fn pause_then_resume_restarts_same_utterance() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let synth = sh("sleep 30", tx);
        synth.speak(utterance(4, "step")).await.unwrap();
        assert_eq!(rx.recv().await, Some(SpeechEvent::Started(UtteranceId(4))));

        synth.pause(UtteranceId(4)).await.unwrap();
        assert!(synth.pause(UtteranceId(4)).await.is_err());

        synth.resume(UtteranceId(4)).await.unwrap();
        assert_eq!(rx.recv().await, Some(SpeechEvent::Started(UtteranceId(4))));
        synth.cancel().await.unwrap();
    }

    #[tokio::test]
    async fn resume_of_other_utterance_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let synth = sh("sleep 30", tx);
        synth.speak(utterance(1, "a")).await.unwrap();
        synth.pause(UtteranceId(1)).await.unwrap();

        assert!(synth.resume(UtteranceId(2)).await.is_err());
        synth.cancel().await.unwrap();
        assert!(synth.resume(UtteranceId(1)).await.is_err());
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let synth = CommandSpeechSynthesizer::new("ecocycle-no-such-tts", vec![], tx);
        let err = synth.speak(utterance(1, "x")).await.unwrap_err();
        assert!(matches!(err, SpeechError::Unavailable(_)));
    }

    #[test]
    fn placeholders_are_substituted() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let synth = CommandSpeechSynthesizer::new(
            "espeak-ng",
            vec!["-v".into(), "{voice}".into(), "{text}".into()],
            tx,
        );
        assert_eq!(
            synth.render_args(&utterance(1, "வணக்கம்")),
            vec!["-v", "ta-IN", "வணக்கம்"]
        );
    }
}
