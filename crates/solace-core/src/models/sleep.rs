use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Valid bounds for a sleep quality rating.
pub const SLEEP_QUALITY_MIN: i32 = 1;
pub const SLEEP_QUALITY_MAX: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SleepLog {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub hours: f64,
    pub quality: i32,
    pub note: Option<String>,
    pub logged_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSleepLog {
    pub hours: f64,
    pub quality: i32,
    pub note: Option<String>,
}
