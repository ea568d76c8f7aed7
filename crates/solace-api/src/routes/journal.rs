use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use solace_audit::events::{AuditEvent, PortalAction};
use solace_core::models::mood::NewMoodLog;
use solace_core::models::sleep::NewSleepLog;
use solace_portal::journal::PatientJournal;

use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct LogResponse {
    pub id: String,
}

pub async fn log_mood(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(entry): Json<NewMoodLog>,
) -> Result<Json<LogResponse>, ApiError> {
    let journal = PatientJournal::new(state.store.clone());
    let patient = journal.patient_for_user(user.id).await?;
    let id = journal.log_mood(patient.id, &entry).await?;

    AuditEvent::new(PortalAction::MoodLogged)
        .user(user.id)
        .patient(patient.id)
        .resource(id.to_string())
        .emit();

    Ok(Json(LogResponse { id: id.to_string() }))
}

pub async fn log_sleep(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(entry): Json<NewSleepLog>,
) -> Result<Json<LogResponse>, ApiError> {
    let journal = PatientJournal::new(state.store.clone());
    let patient = journal.patient_for_user(user.id).await?;
    let id = journal.log_sleep(patient.id, &entry).await?;

    AuditEvent::new(PortalAction::SleepLogged)
        .user(user.id)
        .patient(patient.id)
        .resource(id.to_string())
        .emit();

    Ok(Json(LogResponse { id: id.to_string() }))
}
