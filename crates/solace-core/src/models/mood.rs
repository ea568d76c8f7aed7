use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Valid bounds for a mood rating (1 = very low, 5 = great).
pub const MOOD_SCORE_MIN: i32 = 1;
pub const MOOD_SCORE_MAX: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MoodLog {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub mood_score: i32,
    pub note: Option<String>,
    pub logged_at: jiff::Timestamp,
}

/// Payload for creating a mood log; id and timestamp are assigned on insert.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewMoodLog {
    pub mood_score: i32,
    pub note: Option<String>,
}
