use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A patient profile row. Created by the clinic during intake; the portal
/// only ever reads it, keyed by the authenticated user's subject id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub created_at: jiff::Timestamp,
}
