//! Speech synthesizers backed by the host system.

mod command;
mod silent;

pub use command::CommandSpeechSynthesizer;
pub use silent::SilentSpeechSynthesizer;
