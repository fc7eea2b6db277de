//! Per-waterbody health card, recomputed from the tests recorded against it.

use crate::auth::AuthUser;
use crate::db::{queries, DbPool};
use crate::models::water_test::WaterTest;
use async_trait::async_trait;

/// What changed: the waterbody a new test was recorded for, and who recorded it.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthCardUpdate {
    pub waterbody_name: String,
    pub waterbody_id: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub submitted_by: AuthUser,
}

impl HealthCardUpdate {
    pub fn for_test(test: &WaterTest, submitted_by: &AuthUser) -> Self {
        Self {
            waterbody_name: test.waterbody_name.clone(),
            waterbody_id: test.waterbody_id.clone(),
            location: test.location.clone(),
            latitude: test.latitude,
            longitude: test.longitude,
            submitted_by: submitted_by.clone(),
        }
    }

    /// Cards are keyed by the waterbody reference when one was given, else by
    /// the case-folded name.
    pub fn waterbody_key(&self) -> String {
        match &self.waterbody_id {
            Some(id) => format!("id:{}", id),
            None => format!("name:{}", self.waterbody_name.to_lowercase()),
        }
    }
}

#[async_trait]
pub trait HealthCardService: Send + Sync {
    async fn upsert(&self, update: &HealthCardUpdate) -> anyhow::Result<()>;
}

pub struct PgHealthCards {
    pool: DbPool,
}

impl PgHealthCards {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCardService for PgHealthCards {
    async fn upsert(&self, update: &HealthCardUpdate) -> anyhow::Result<()> {
        sqlx::query(queries::UPSERT_HEALTH_CARD)
            .bind(update.waterbody_key())
            .bind(&update.waterbody_name)
            .bind(&update.waterbody_id)
            .bind(&update.location)
            .bind(update.latitude)
            .bind(update.longitude)
            .bind(update.submitted_by.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
