//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The scan workflow only talks to the
//! AI service, the image source and the speech engine through these traits.

pub mod ai;
pub mod app_dirs;
pub mod errors;
pub mod image_source;
mod scan_event;
pub mod speech;

pub use ai::{AiServiceError, ClassifierPort, InstructionGeneratorPort};
pub use app_dirs::AppDirsPort;
pub use errors::AppDirsError;
pub use image_source::ImageSourcePort;
pub use scan_event::{NoopScanEventPort, ScanEventPort};
pub use speech::SpeechSynthesizerPort;
