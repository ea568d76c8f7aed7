use serde_json::json;
use uuid::Uuid;

use solace_audit::events::{AuditEvent, PortalAction};
use solace_portal::error::PortalError;
use solace_portal::observer::WorkflowObserver;
use solace_portal::render::TestView;

/// Workflow observer that turns view-layer callbacks into audit events.
pub struct AuditObserver {
    user_id: Uuid,
    assignment_id: String,
}

impl AuditObserver {
    pub fn new(user_id: Uuid, assignment_id: impl Into<String>) -> Self {
        Self {
            user_id,
            assignment_id: assignment_id.into(),
        }
    }

    fn event(&self, action: PortalAction) -> AuditEvent {
        AuditEvent::new(action)
            .user(self.user_id)
            .resource(self.assignment_id.clone())
    }
}

impl WorkflowObserver for AuditObserver {
    fn on_loaded(&self, view: &TestView) {
        self.event(PortalAction::TestLoaded)
            .with_details(json!({ "test_name": view.test_name }))
            .emit();
    }

    fn on_load_failed(&self, error: &PortalError) {
        self.event(PortalAction::TestLoadFailed)
            .with_details(json!({ "error": error.to_string() }))
            .emit();
    }

    fn on_submitted(&self, total_score: i64) {
        self.event(PortalAction::TestSubmitted)
            .with_details(json!({ "total_score": total_score }))
            .emit();
    }

    fn on_submit_failed(&self, error: &PortalError) {
        self.event(PortalAction::TestSubmitFailed)
            .with_details(json!({ "error": error.to_string() }))
            .emit();
    }
}
