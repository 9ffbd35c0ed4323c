//! Business logic use cases
//!
//! [capture] → ScanOrchestrator → (creative | disposal)
//!                 ↓
//!          SpeechPlayback narrates whatever screen is shown

pub mod scan;
pub mod speech;

pub use scan::ScanOrchestrator;
pub use speech::SpeechPlayback;
