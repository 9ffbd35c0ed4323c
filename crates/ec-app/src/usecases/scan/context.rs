use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use ec_core::{Language, ScanSessionId, ScanState};

/// Shared scan context containing state, dispatch lock and the request token.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for one transition + state update, never across a
///   remote call.
/// - `state`: used for both reading (`get_state`) and writing.
///
/// ## Request token
/// Bumped whenever a transition issues side-effects or the scan is
/// cancelled. A completion is only applied when it carries the current token.
#[derive(Clone)]
pub struct ScanContext {
    state: Arc<Mutex<ScanState>>,
    dispatch_lock: Arc<Mutex<()>>,
    request_token: Arc<AtomicU64>,
    language: Arc<Mutex<Language>>,
    session_id: Arc<Mutex<ScanSessionId>>,
}

impl ScanContext {
    pub fn new(initial_state: ScanState, language: Language) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
            request_token: Arc::new(AtomicU64::new(0)),
            language: Arc::new(Mutex::new(language)),
            session_id: Arc::new(Mutex::new(ScanSessionId::new())),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Lightweight read; does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> ScanState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Only call after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: ScanState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }

    pub fn current_token(&self) -> u64 {
        self.request_token.load(Ordering::SeqCst)
    }

    /// Invalidates every outstanding request and returns the new token.
    pub fn next_token(&self) -> u64 {
        self.request_token.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub async fn language(&self) -> Language {
        *self.language.lock().await
    }

    pub async fn set_language(&self, language: Language) {
        *self.language.lock().await = language;
    }

    pub async fn session_id(&self) -> ScanSessionId {
        self.session_id.lock().await.clone()
    }

    /// Starts a new scan session and returns its id.
    pub async fn rotate_session(&self) -> ScanSessionId {
        let mut guard = self.session_id.lock().await;
        *guard = ScanSessionId::new();
        guard.clone()
    }
}
