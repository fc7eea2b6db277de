use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaderAlert {
    pub id: Uuid,
    pub leader_id: Uuid,
    pub message: String,
    pub water_test_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GlobalAlert {
    pub id: Uuid,
    pub message: String,
    pub water_test_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLeaderAlert {
    pub leader_id: Uuid,
    pub message: String,
    pub water_test_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGlobalAlert {
    pub message: String,
    pub water_test_id: Uuid,
}
