use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Join row between a user and a post; unique per (user_id, post_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: i64,
    pub user_id: Uuid,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}
