//! # ec-infra
//!
//! Adapters from EcoCycle ports to the Gemini REST API and the local
//! filesystem, plus outbound link builders.

pub mod ai;
pub mod capture;
pub mod links;

pub use ai::{CachingClassifier, GeminiClient};
pub use capture::FsImageSource;
