use std::sync::Arc;

use solace_auth::session::SessionProvider;
use solace_store::record::RecordStore;

/// Shared application state, injected into all route handlers via Axum
/// state. The store and session provider are explicit dependencies here —
/// never ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub sessions: Arc<dyn SessionProvider>,
}
