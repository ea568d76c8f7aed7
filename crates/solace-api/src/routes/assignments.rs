use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use solace_audit::events::{AuditEvent, PortalAction};
use solace_portal::journal::{AssignedTestSummary, PatientJournal};
use solace_portal::render::TestView;
use solace_portal::workflow::{AnswerSet, AssignmentWorkflow};

use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::observer::AuditObserver;
use crate::state::AppState;

pub async fn list_assigned(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<AssignedTestSummary>>, ApiError> {
    let journal = PatientJournal::new(state.store.clone());
    let patient = journal.patient_for_user(user.id).await?;
    let assigned = journal.assigned_tests(patient.id).await?;

    AuditEvent::new(PortalAction::AssignmentsViewed)
        .user(user.id)
        .patient(patient.id)
        .emit();

    Ok(Json(assigned))
}

pub async fn load_test(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<TestView>, ApiError> {
    let workflow = AssignmentWorkflow::new(state.store.clone());
    let observer = AuditObserver::new(user.id, id.clone());
    let view = workflow.load_observed(&id, &observer).await?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub answers: AnswerSet,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub total_score: i64,
}

pub async fn submit_test(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let workflow = AssignmentWorkflow::new(state.store.clone());
    let observer = AuditObserver::new(user.id, id.clone());
    let total_score = workflow.submit_observed(&id, &req.answers, &observer).await?;
    Ok(Json(SubmitResponse { total_score }))
}
