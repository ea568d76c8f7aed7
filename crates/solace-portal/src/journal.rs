use std::sync::Arc;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use solace_core::collections;
use solace_core::models::assignment::AssignmentStatus;
use solace_core::models::mood::{MOOD_SCORE_MAX, MOOD_SCORE_MIN, MoodLog, NewMoodLog};
use solace_core::models::patient::Patient;
use solace_core::models::sleep::{NewSleepLog, SLEEP_QUALITY_MAX, SLEEP_QUALITY_MIN, SleepLog};
use solace_store::filter::Filter;
use solace_store::record::{Nested, RecordId, RecordStore};

use crate::error::PortalError;

/// One entry of the dashboard's assigned-test list.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssignedTestSummary {
    pub assignment_id: Uuid,
    pub test_name: String,
    pub assigned_at: jiff::Timestamp,
}

#[derive(Debug, Deserialize)]
struct AssignedRow {
    id: Uuid,
    assigned_at: jiff::Timestamp,
    custom_tests: EmbeddedTestName,
}

#[derive(Debug, Deserialize)]
struct EmbeddedTestName {
    test_name: String,
}

/// Mood and sleep logging plus the assigned-test listing. Single-shot
/// inserts and reads, validated up front, never retried.
pub struct PatientJournal {
    store: Arc<dyn RecordStore>,
}

impl PatientJournal {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Resolve the patient profile behind an authenticated user.
    pub async fn patient_for_user(&self, user_id: Uuid) -> Result<Patient, PortalError> {
        let filter = Filter::new().eq("user_id", user_id.to_string());
        let row = self
            .store
            .fetch_one(collections::PATIENTS, &filter)
            .await
            .map_err(PortalError::from_read)?;

        serde_json::from_value(row)
            .map_err(|e| PortalError::Fetch(format!("malformed patient record: {e}")))
    }

    pub async fn log_mood(
        &self,
        patient_id: Uuid,
        entry: &NewMoodLog,
    ) -> Result<RecordId, PortalError> {
        if !(MOOD_SCORE_MIN..=MOOD_SCORE_MAX).contains(&entry.mood_score) {
            return Err(PortalError::InvalidInput(format!(
                "mood score must be between {MOOD_SCORE_MIN} and {MOOD_SCORE_MAX}"
            )));
        }

        let log = MoodLog {
            id: Uuid::new_v4(),
            patient_id,
            mood_score: entry.mood_score,
            note: entry.note.clone(),
            logged_at: Timestamp::now(),
        };
        let record =
            serde_json::to_value(&log).map_err(|e| PortalError::Write(e.to_string()))?;
        self.store
            .insert(collections::MOOD_LOGS, record)
            .await
            .map_err(|e| PortalError::Write(e.to_string()))
    }

    pub async fn log_sleep(
        &self,
        patient_id: Uuid,
        entry: &NewSleepLog,
    ) -> Result<RecordId, PortalError> {
        if !entry.hours.is_finite() || entry.hours <= 0.0 {
            return Err(PortalError::InvalidInput(
                "hours slept is required".to_string(),
            ));
        }
        if !(SLEEP_QUALITY_MIN..=SLEEP_QUALITY_MAX).contains(&entry.quality) {
            return Err(PortalError::InvalidInput(format!(
                "sleep quality must be between {SLEEP_QUALITY_MIN} and {SLEEP_QUALITY_MAX}"
            )));
        }

        let log = SleepLog {
            id: Uuid::new_v4(),
            patient_id,
            hours: entry.hours,
            quality: entry.quality,
            note: entry.note.clone(),
            logged_at: Timestamp::now(),
        };
        let record =
            serde_json::to_value(&log).map_err(|e| PortalError::Write(e.to_string()))?;
        self.store
            .insert(collections::SLEEP_LOGS, record)
            .await
            .map_err(|e| PortalError::Write(e.to_string()))
    }

    /// List this patient's still-open assignments with their test names.
    pub async fn assigned_tests(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<AssignedTestSummary>, PortalError> {
        let filter = Filter::new()
            .eq("patient_id", patient_id.to_string())
            .eq("status", AssignmentStatus::Assigned.as_str());
        let nested = [Nested::columns(collections::CUSTOM_TESTS, &["test_name"])];

        let rows = self
            .store
            .fetch_all(collections::ASSIGNMENTS, &filter, &nested)
            .await
            .map_err(PortalError::from_read)?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            let parsed: AssignedRow = serde_json::from_value(row)
                .map_err(|e| PortalError::Fetch(format!("malformed assignment record: {e}")))?;
            summaries.push(AssignedTestSummary {
                assignment_id: parsed.id,
                test_name: parsed.custom_tests.test_name,
                assigned_at: parsed.assigned_at,
            });
        }
        Ok(summaries)
    }
}
