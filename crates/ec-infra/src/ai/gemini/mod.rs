//! Gemini REST adapter for the classification and blueprint ports.

mod client;
mod prompt;
mod schema;
mod wire;

pub use client::GeminiClient;
