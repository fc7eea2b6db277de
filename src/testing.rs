//! In-memory collaborators for unit tests.

use crate::db::store::WaterTestStore;
use crate::health_card::{HealthCardService, HealthCardUpdate};
use crate::models::alert::{GlobalAlert, LeaderAlert, NewGlobalAlert, NewLeaderAlert};
use crate::models::user::{LeaderContact, Role};
use crate::models::water_test::{NewWaterTest, Quality, WaterTest};
use crate::notify::{Channel, MessageSender};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Mutex;
use uuid::Uuid;

pub fn sample_test(quality: Quality) -> WaterTest {
    WaterTest {
        id: Uuid::new_v4(),
        waterbody_name: "Hebbal Lake".to_string(),
        waterbody_id: None,
        date_time: Utc.with_ymd_and_hms(2024, 10, 14, 5, 0, 0).unwrap(),
        location: "Ward 7, Bengaluru".to_string(),
        latitude: None,
        longitude: None,
        photo_url: "https://cdn.example.org/hebbal.jpg".to_string(),
        notes: "sampled near inlet".to_string(),
        quality,
        asha_id: Uuid::new_v4(),
        created_at: Utc::now(),
    }
}

struct StoredUser {
    id: Uuid,
    role: Role,
    number: Option<String>,
}

#[derive(Default)]
struct StoreState {
    tests: Vec<WaterTest>,
    users: Vec<StoredUser>,
    leader_alerts: Vec<LeaderAlert>,
    global_alerts: Vec<GlobalAlert>,
    fail_alert_writes: bool,
    fail_everything: bool,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn add_user(&self, role: Role, number: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().users.push(StoredUser {
            id,
            role,
            number: number.map(str::to_string),
        });
        id
    }

    /// Stores `test` as-is, keeping its id and timestamps.
    pub fn seed(&self, test: WaterTest) {
        self.state.lock().unwrap().tests.push(test);
    }

    pub fn fail_alert_writes(&self) {
        self.state.lock().unwrap().fail_alert_writes = true;
    }

    pub fn fail_everything(&self) {
        self.state.lock().unwrap().fail_everything = true;
    }

    pub fn tests(&self) -> Vec<WaterTest> {
        self.state.lock().unwrap().tests.clone()
    }

    pub fn leader_alerts(&self) -> Vec<LeaderAlert> {
        self.state.lock().unwrap().leader_alerts.clone()
    }

    pub fn global_alerts(&self) -> Vec<GlobalAlert> {
        self.state.lock().unwrap().global_alerts.clone()
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.state.lock().unwrap().fail_everything {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

fn newest_first(mut tests: Vec<WaterTest>) -> Vec<WaterTest> {
    tests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    tests
}

#[async_trait]
impl WaterTestStore for InMemoryStore {
    async fn insert_water_test(&self, new: &NewWaterTest) -> anyhow::Result<WaterTest> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        // Strictly increasing so ordering by created_at is deterministic.
        let created_at = state
            .tests
            .iter()
            .map(|t| t.created_at)
            .max()
            .map(|latest| latest + Duration::milliseconds(1))
            .unwrap_or_else(Utc::now);
        let test = WaterTest {
            id: Uuid::new_v4(),
            waterbody_name: new.waterbody_name.clone(),
            waterbody_id: new.waterbody_id.clone(),
            date_time: new.date_time,
            location: new.location.clone(),
            latitude: new.latitude,
            longitude: new.longitude,
            photo_url: new.photo_url.clone(),
            notes: new.notes.clone(),
            quality: new.quality,
            asha_id: new.asha_id,
            created_at,
        };
        state.tests.push(test.clone());
        Ok(test)
    }

    async fn find_water_test(&self, id: Uuid) -> anyhow::Result<Option<WaterTest>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.tests.iter().find(|t| t.id == id).cloned())
    }

    async fn update_water_test(&self, test: &WaterTest) -> anyhow::Result<Option<WaterTest>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        Ok(state.tests.iter_mut().find(|t| t.id == test.id).map(|stored| {
            *stored = WaterTest {
                asha_id: stored.asha_id,
                created_at: stored.created_at,
                ..test.clone()
            };
            stored.clone()
        }))
    }

    async fn delete_water_test(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let before = state.tests.len();
        state.tests.retain(|t| t.id != id);
        Ok(state.tests.len() < before)
    }

    async fn list_water_tests(&self) -> anyhow::Result<Vec<WaterTest>> {
        self.check()?;
        Ok(newest_first(self.tests()))
    }

    async fn list_water_tests_by_asha(&self, asha_id: Uuid) -> anyhow::Result<Vec<WaterTest>> {
        self.check()?;
        let own = self
            .tests()
            .into_iter()
            .filter(|t| t.asha_id == asha_id)
            .collect();
        Ok(newest_first(own))
    }

    async fn leader_contacts(&self) -> anyhow::Result<Vec<LeaderContact>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .filter(|u| u.role == Role::Leader)
            .map(|u| LeaderContact {
                id: u.id,
                number: u.number.clone(),
            })
            .collect())
    }

    async fn all_user_numbers(&self) -> anyhow::Result<Vec<Option<String>>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().map(|u| u.number.clone()).collect())
    }

    async fn insert_leader_alerts(
        &self,
        alerts: &[NewLeaderAlert],
    ) -> anyhow::Result<Vec<LeaderAlert>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if state.fail_alert_writes {
            anyhow::bail!("leader_alerts is read-only");
        }
        let inserted: Vec<LeaderAlert> = alerts
            .iter()
            .map(|alert| LeaderAlert {
                id: Uuid::new_v4(),
                leader_id: alert.leader_id,
                message: alert.message.clone(),
                water_test_id: alert.water_test_id,
                created_at: Utc::now(),
            })
            .collect();
        state.leader_alerts.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn insert_global_alert(&self, alert: &NewGlobalAlert) -> anyhow::Result<GlobalAlert> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if state.fail_alert_writes {
            anyhow::bail!("global_alerts is read-only");
        }
        let alert = GlobalAlert {
            id: Uuid::new_v4(),
            message: alert.message.clone(),
            water_test_id: alert.water_test_id,
            created_at: Utc::now(),
        };
        state.global_alerts.push(alert.clone());
        Ok(alert)
    }
}

/// Records every message; optionally fails for one number.
pub struct RecordingSender {
    channel: Channel,
    fail_for: Option<String>,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            fail_for: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_for(channel: Channel, number: &str) -> Self {
        Self {
            fail_for: Some(number.to_string()),
            ..Self::new(channel)
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent().into_iter().map(|(to, _)| to).collect()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        if self.fail_for.as_deref() == Some(to) {
            anyhow::bail!("gateway timeout");
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeHealthCards {
    fail: bool,
    panic: bool,
    calls: Mutex<Vec<HealthCardUpdate>>,
}

impl FakeHealthCards {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<HealthCardUpdate> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HealthCardService for FakeHealthCards {
    async fn upsert(&self, update: &HealthCardUpdate) -> anyhow::Result<()> {
        if self.panic {
            panic!("health card recompute blew up");
        }
        self.calls.lock().unwrap().push(update.clone());
        if self.fail {
            anyhow::bail!("health card table locked");
        }
        Ok(())
    }
}
