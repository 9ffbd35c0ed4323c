//! # ec-platform
//!
//! Platform-specific implementations for EcoCycle.
//!
//! This crate resolves per-user directories and drives the operating
//! system's speech engine.

pub mod app_dirs;
pub mod speech;

pub use app_dirs::DirsAppDirsAdapter;
pub use speech::{CommandSpeechSynthesizer, SilentSpeechSynthesizer};
