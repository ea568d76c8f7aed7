use crate::error::PortalError;
use crate::render::TestView;

/// View-layer hooks around the assignment workflow. All methods default to
/// no-ops; the API layer implements them with audit events, a frontend
/// could implement them with navigation.
pub trait WorkflowObserver: Send + Sync {
    fn on_loaded(&self, _view: &TestView) {}
    fn on_load_failed(&self, _error: &PortalError) {}
    fn on_submitted(&self, _total_score: i64) {}
    fn on_submit_failed(&self, _error: &PortalError) {}
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl WorkflowObserver for NoopObserver {}
