//! EcoCycle Application Orchestration Layer
//!
//! This crate contains the scan workflow use cases and narration playback.

pub mod deps;
pub mod usecases;

pub use deps::ScanDeps;
pub use usecases::{ScanOrchestrator, SpeechPlayback};
