use crate::db::{queries, DbPool};
use crate::models::alert::{GlobalAlert, LeaderAlert, NewGlobalAlert, NewLeaderAlert};
use crate::models::user::LeaderContact;
use crate::models::water_test::{NewWaterTest, WaterTest};
use async_trait::async_trait;
use uuid::Uuid;

/// Data access used by the water test handlers and the alert fan-out.
#[async_trait]
pub trait WaterTestStore: Send + Sync {
    async fn insert_water_test(&self, new: &NewWaterTest) -> anyhow::Result<WaterTest>;

    async fn find_water_test(&self, id: Uuid) -> anyhow::Result<Option<WaterTest>>;

    /// Writes every mutable column of `test`. Returns `None` if the record
    /// no longer exists.
    async fn update_water_test(&self, test: &WaterTest) -> anyhow::Result<Option<WaterTest>>;

    async fn delete_water_test(&self, id: Uuid) -> anyhow::Result<bool>;

    /// Newest first.
    async fn list_water_tests(&self) -> anyhow::Result<Vec<WaterTest>>;

    /// Newest first.
    async fn list_water_tests_by_asha(&self, asha_id: Uuid) -> anyhow::Result<Vec<WaterTest>>;

    async fn leader_contacts(&self) -> anyhow::Result<Vec<LeaderContact>>;

    async fn all_user_numbers(&self) -> anyhow::Result<Vec<Option<String>>>;

    async fn insert_leader_alerts(
        &self,
        alerts: &[NewLeaderAlert],
    ) -> anyhow::Result<Vec<LeaderAlert>>;

    async fn insert_global_alert(&self, alert: &NewGlobalAlert) -> anyhow::Result<GlobalAlert>;
}

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WaterTestStore for PgStore {
    async fn insert_water_test(&self, new: &NewWaterTest) -> anyhow::Result<WaterTest> {
        let test = sqlx::query_as::<_, WaterTest>(queries::INSERT_WATER_TEST)
            .bind(Uuid::new_v4())
            .bind(&new.waterbody_name)
            .bind(&new.waterbody_id)
            .bind(new.date_time)
            .bind(&new.location)
            .bind(new.latitude)
            .bind(new.longitude)
            .bind(&new.photo_url)
            .bind(&new.notes)
            .bind(new.quality.as_str())
            .bind(new.asha_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(test)
    }

    async fn find_water_test(&self, id: Uuid) -> anyhow::Result<Option<WaterTest>> {
        let test = sqlx::query_as::<_, WaterTest>(queries::SELECT_WATER_TEST)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(test)
    }

    async fn update_water_test(&self, test: &WaterTest) -> anyhow::Result<Option<WaterTest>> {
        let test = sqlx::query_as::<_, WaterTest>(queries::UPDATE_WATER_TEST)
            .bind(test.id)
            .bind(&test.waterbody_name)
            .bind(&test.waterbody_id)
            .bind(test.date_time)
            .bind(&test.location)
            .bind(test.latitude)
            .bind(test.longitude)
            .bind(&test.photo_url)
            .bind(&test.notes)
            .bind(test.quality.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(test)
    }

    async fn delete_water_test(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(queries::DELETE_WATER_TEST)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_water_tests(&self) -> anyhow::Result<Vec<WaterTest>> {
        let tests = sqlx::query_as::<_, WaterTest>(queries::SELECT_ALL_WATER_TESTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(tests)
    }

    async fn list_water_tests_by_asha(&self, asha_id: Uuid) -> anyhow::Result<Vec<WaterTest>> {
        let tests = sqlx::query_as::<_, WaterTest>(queries::SELECT_WATER_TESTS_BY_ASHA)
            .bind(asha_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tests)
    }

    async fn leader_contacts(&self) -> anyhow::Result<Vec<LeaderContact>> {
        let leaders = sqlx::query_as::<_, LeaderContact>(queries::SELECT_LEADER_CONTACTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(leaders)
    }

    async fn all_user_numbers(&self) -> anyhow::Result<Vec<Option<String>>> {
        let numbers = sqlx::query_scalar::<_, Option<String>>(queries::SELECT_ALL_USER_NUMBERS)
            .fetch_all(&self.pool)
            .await?;
        Ok(numbers)
    }

    async fn insert_leader_alerts(
        &self,
        alerts: &[NewLeaderAlert],
    ) -> anyhow::Result<Vec<LeaderAlert>> {
        if alerts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = alerts.iter().map(|_| Uuid::new_v4()).collect();
        let leader_ids: Vec<Uuid> = alerts.iter().map(|a| a.leader_id).collect();
        let messages: Vec<String> = alerts.iter().map(|a| a.message.clone()).collect();
        let water_test_ids: Vec<Uuid> = alerts.iter().map(|a| a.water_test_id).collect();

        let inserted = sqlx::query_as::<_, LeaderAlert>(queries::INSERT_LEADER_ALERTS)
            .bind(&ids)
            .bind(&leader_ids)
            .bind(&messages)
            .bind(&water_test_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(inserted)
    }

    async fn insert_global_alert(&self, alert: &NewGlobalAlert) -> anyhow::Result<GlobalAlert> {
        let alert = sqlx::query_as::<_, GlobalAlert>(queries::INSERT_GLOBAL_ALERT)
            .bind(Uuid::new_v4())
            .bind(&alert.message)
            .bind(alert.water_test_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(alert)
    }
}
