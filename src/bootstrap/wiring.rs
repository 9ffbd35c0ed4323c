//! # Dependency Injection / 依赖注入
//!
//! Builds the concrete adapters from [`AppConfig`] and hands them to the use
//! cases. This is the only place that names concrete adapter types.

use std::sync::Arc;

use ec_app::{ScanDeps, ScanOrchestrator, SpeechPlayback};
use ec_core::{
    config::AppConfig,
    ports::{
        ClassifierPort, ImageSourcePort, InstructionGeneratorPort, ScanEventPort,
        SpeechSynthesizerPort,
    },
    speech::SpeechEvent,
    Language,
};
use ec_infra::{CachingClassifier, FsImageSource, GeminiClient};
use ec_platform::{CommandSpeechSynthesizer, SilentSpeechSynthesizer};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("AI API key is not configured (set ai.api_key or ECOCYCLE_API_KEY)")]
    MissingApiKey,

    #[error("AI client initialization failed: {0}")]
    AiClientInit(String),
}

/// Options taken from the command line rather than the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiringOptions {
    pub language: Language,
    pub mute: bool,
}

/// Wired use cases for one process.
pub struct AppRuntime {
    pub orchestrator: Arc<ScanOrchestrator>,
    pub speech: Arc<SpeechPlayback>,
    pub language: Language,
}

struct InfraLayer {
    image_source: Arc<dyn ImageSourcePort>,
    classifier: Arc<dyn ClassifierPort>,
    instruction_generator: Arc<dyn InstructionGeneratorPort>,
}

fn create_infra_layer(config: &AppConfig) -> WiringResult<InfraLayer> {
    if config.ai.api_key.trim().is_empty() {
        return Err(WiringError::MissingApiKey);
    }

    let gemini = Arc::new(
        GeminiClient::new(&config.ai).map_err(|e| WiringError::AiClientInit(e.to_string()))?,
    );
    let mut classifier: Arc<dyn ClassifierPort> = gemini.clone();
    if config.ai.cache_classifications {
        classifier = Arc::new(CachingClassifier::new(classifier));
    }
    let instruction_generator: Arc<dyn InstructionGeneratorPort> = gemini;
    let image_source: Arc<dyn ImageSourcePort> = Arc::new(FsImageSource::new());

    Ok(InfraLayer {
        image_source,
        classifier,
        instruction_generator,
    })
}

fn create_platform_layer(
    config: &AppConfig,
    mute: bool,
    events: mpsc::UnboundedSender<SpeechEvent>,
) -> Arc<dyn SpeechSynthesizerPort> {
    if mute || !config.speech.enabled || config.speech.program.trim().is_empty() {
        info!(mute, enabled = config.speech.enabled, "speech narration disabled");
        return Arc::new(SilentSpeechSynthesizer::new(events));
    }
    info!(program = %config.speech.program, "speech narration enabled");
    Arc::new(CommandSpeechSynthesizer::new(
        config.speech.program.clone(),
        config.speech.args.clone(),
        events,
    ))
}

/// Wires every adapter and starts the speech event loop.
///
/// Must be called from inside a Tokio runtime.
pub fn wire_dependencies(
    config: &AppConfig,
    options: WiringOptions,
    scan_events: Arc<dyn ScanEventPort>,
) -> WiringResult<AppRuntime> {
    let infra = create_infra_layer(config)?;

    let (speech_tx, speech_rx) = mpsc::unbounded_channel();
    let synthesizer = create_platform_layer(config, options.mute, speech_tx);
    let speech = Arc::new(SpeechPlayback::new(synthesizer));
    tokio::spawn(speech.clone().run_event_loop(speech_rx));

    let orchestrator = Arc::new(ScanOrchestrator::new(
        ScanDeps {
            image_source: infra.image_source,
            classifier: infra.classifier,
            instruction_generator: infra.instruction_generator,
            scan_events,
        },
        options.language,
    ));

    if config.ai.cache_classifications {
        info!("classification cache enabled");
    }
    if config.ai.base_url.starts_with("http://") {
        warn!(base_url = %config.ai.base_url, "AI endpoint is not using TLS");
    }

    Ok(AppRuntime {
        orchestrator,
        speech,
        language: options.language,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_core::{ports::NoopScanEventPort, scan::WorkflowState, speech::SpeechState};

    fn options(mute: bool) -> WiringOptions {
        WiringOptions {
            language: Language::Ta,
            mute,
        }
    }

    #[test]
    fn test_wiring_error_display() {
        let err = WiringError::AiClientInit("tls backend".to_string());
        assert!(err.to_string().contains("AI client initialization"));
        assert!(err.to_string().contains("tls backend"));
        assert!(WiringError::MissingApiKey
            .to_string()
            .contains("ECOCYCLE_API_KEY"));
    }

    #[tokio::test]
    async fn test_wire_dependencies_requires_api_key() {
        let config = AppConfig::default();
        let result = wire_dependencies(&config, options(true), Arc::new(NoopScanEventPort));
        assert!(matches!(result, Err(WiringError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_wire_dependencies_creates_runtime() {
        let mut config = AppConfig::default();
        config.ai.api_key = "test-key".into();
        config.ai.cache_classifications = true;

        let runtime =
            wire_dependencies(&config, options(true), Arc::new(NoopScanEventPort)).unwrap();

        assert_eq!(runtime.language, Language::Ta);
        assert_eq!(runtime.orchestrator.language().await, Language::Ta);
        assert_eq!(
            runtime.orchestrator.get_state().await.kind(),
            WorkflowState::Idle
        );
        assert_eq!(runtime.speech.state().await, SpeechState::Idle);
    }

    #[tokio::test]
    async fn muted_speech_finishes_immediately() {
        let mut config = AppConfig::default();
        config.ai.api_key = "test-key".into();

        let runtime =
            wire_dependencies(&config, options(true), Arc::new(NoopScanEventPort)).unwrap();
        runtime.speech.speak("hello", Language::En).await.unwrap();

        // the event loop drains Started/Ended from the silent synthesizer
        for _ in 0..50 {
            if runtime.speech.state().await == SpeechState::Idle {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(runtime.speech.state().await, SpeechState::Idle);
    }
}
