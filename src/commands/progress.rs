use std::io::Write;

use async_trait::async_trait;
use tracing::debug;

use ec_core::{i18n::ScanText, ports::ScanEventPort, scan::ScanState, Language};

/// Prints a progress line to stderr while a remote call is pending.
pub struct TerminalScanEvents {
    language: Language,
}

impl TerminalScanEvents {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

#[async_trait]
impl ScanEventPort for TerminalScanEvents {
    async fn emit_scan_state_changed(&self, state: &ScanState) {
        debug!(state = ?state.kind(), "scan state changed");
        if state.is_pending() {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", ScanText::for_language(self.language).analyzing);
        }
    }
}
