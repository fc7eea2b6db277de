//! HTTP surface.


use crate::auth;
use crate::db::store::WaterTestStore;
use crate::health_card::HealthCardService;
use crate::notify::MessageSender;
use axum::routing::{get, post, put};
use axum::{middleware, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Collaborators shared across handlers.
pub struct AppState {
    pub store: Arc<dyn WaterTestStore>,
    /// Every channel an alert text goes out on, in send order.
    pub senders: Vec<Arc<dyn MessageSender>>,
    pub health_cards: Arc<dyn HealthCardService>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/water-tests",
            post(water_tests::create_water_test).get(water_tests::list_all_water_tests),
        )
        .route("/api/water-tests/mine", get(water_tests::list_own_water_tests))
        .route(
            "/api/water-tests/:id",
            put(water_tests::update_water_test).delete(water_tests::delete_water_test),
        )
        .layer(middleware::from_fn(auth::identity_from_gateway))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
