use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// The patient actions worth an audit trail.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalAction {
    MoodLogged,
    SleepLogged,
    AssignmentsViewed,
    TestLoaded,
    TestLoadFailed,
    TestSubmitted,
    TestSubmitFailed,
}

impl PortalAction {
    fn as_str(self) -> &'static str {
        match self {
            PortalAction::MoodLogged => "mood_logged",
            PortalAction::SleepLogged => "sleep_logged",
            PortalAction::AssignmentsViewed => "assignments_viewed",
            PortalAction::TestLoaded => "test_loaded",
            PortalAction::TestLoadFailed => "test_load_failed",
            PortalAction::TestSubmitted => "test_submitted",
            PortalAction::TestSubmitFailed => "test_submit_failed",
        }
    }
}

/// One audit record. Build it up with the setters, then [`emit`](Self::emit).
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: PortalAction,
    pub user_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub resource_id: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: PortalAction) -> Self {
        Self {
            action,
            user_id: None,
            patient_id: None,
            resource_id: None,
            details: None,
        }
    }

    pub fn user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn patient(mut self, patient_id: Uuid) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    pub fn resource(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this event through `tracing`.
    pub fn emit(&self) {
        info!(
            audit.action = self.action.as_str(),
            audit.user_id = self.user_id.map(|id| id.to_string()),
            audit.patient_id = self.patient_id.map(|id| id.to_string()),
            audit.resource_id = self.resource_id.as_deref(),
            audit.details = self.details.as_ref().map(|d| d.to_string()),
            "audit event"
        );
    }
}
