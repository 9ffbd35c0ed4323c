//! Narration use cases.

mod playback;

pub use playback::SpeechPlayback;
