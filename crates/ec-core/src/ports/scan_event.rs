use crate::scan::ScanState;

#[async_trait::async_trait]
pub trait ScanEventPort: Send + Sync {
    async fn emit_scan_state_changed(&self, state: &ScanState);
}

/// Event port that drops every notification.
pub struct NoopScanEventPort;

#[async_trait::async_trait]
impl ScanEventPort for NoopScanEventPort {
    async fn emit_scan_state_changed(&self, _state: &ScanState) {}
}
