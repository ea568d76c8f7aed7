use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// The persisted outcome of one completed assignment. Written exactly once,
/// immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TestResult {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub total_score: i64,
    pub created_at: jiff::Timestamp,
}
