//! # Scan Dependencies / 扫描依赖
//!
//! Dependency grouping for `ScanOrchestrator` construction.
//!
//! **Note / 注意**: This is NOT a Builder pattern. No build steps, no default
//! values, no hidden logic. Just parameter grouping.

use std::sync::Arc;
use ec_core::ports::*;

/// Scan dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required - no defaults, no optional fields.
pub struct ScanDeps {
    pub image_source: Arc<dyn ImageSourcePort>,
    pub classifier: Arc<dyn ClassifierPort>,
    pub instruction_generator: Arc<dyn InstructionGeneratorPort>,
    pub scan_events: Arc<dyn ScanEventPort>,
}
