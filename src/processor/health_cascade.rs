use crate::auth::AuthUser;
use crate::health_card::{HealthCardService, HealthCardUpdate};
use crate::models::water_test::WaterTest;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tracing::{debug, warn};

/// Recomputes the waterbody's health card after a test is recorded.
///
/// Best effort: errors and panics from the health card service are logged
/// here and go no further. The test itself is already saved.
pub async fn refresh_health_card(
    service: &dyn HealthCardService,
    test: &WaterTest,
    submitted_by: &AuthUser,
) {
    let update = HealthCardUpdate::for_test(test, submitted_by);

    match AssertUnwindSafe(service.upsert(&update)).catch_unwind().await {
        Ok(Ok(())) => debug!(
            "Health card refreshed for '{}' after water test {}",
            update.waterbody_name, test.id
        ),
        Ok(Err(e)) => warn!(
            "Health card update for '{}' failed after water test {} was saved: {:#}",
            update.waterbody_name, test.id, e
        ),
        Err(_) => warn!(
            "Health card update for '{}' panicked after water test {} was saved",
            update.waterbody_name, test.id
        ),
    }
}
