//! AI service adapters.

mod cache;
pub mod gemini;

pub use cache::CachingClassifier;
pub use gemini::GeminiClient;
