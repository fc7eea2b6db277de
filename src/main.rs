mod auth;
mod config;
mod db;
mod error;
mod health_card;
mod models;
mod notify;
mod processor;
mod routes;
mod time;

#[cfg(test)]
mod testing;

use config::AppConfig;
use db::store::PgStore;
use health_card::PgHealthCards;
use notify::twilio::TwilioSender;
use notify::{Channel, LogSender, MessageSender};
use routes::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

fn build_senders(config: &AppConfig) -> anyhow::Result<Vec<Arc<dyn MessageSender>>> {
    let channels = [Channel::Sms, Channel::WhatsApp];
    match &config.twilio {
        Some(twilio) => {
            let timeout = Duration::from_secs(config.notify_timeout_secs);
            channels
                .into_iter()
                .map(|channel| {
                    TwilioSender::new(twilio, channel, timeout)
                        .map(|s| Arc::new(s) as Arc<dyn MessageSender>)
                })
                .collect()
        }
        None => {
            warn!("TWILIO_ACCOUNT_SID/TWILIO_AUTH_TOKEN not set; alert texts will only be logged");
            Ok(channels
                .into_iter()
                .map(|channel| Arc::new(LogSender::new(channel)) as Arc<dyn MessageSender>)
                .collect())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Water Test Service...");

    // Init DB
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    info!("Connected to database");

    db::run_migrations(&pool).await?;
    info!("Database migrations complete");

    let state = Arc::new(AppState {
        store: Arc::new(PgStore::new(pool.clone())),
        senders: build_senders(&config)?,
        health_cards: Arc::new(PgHealthCards::new(pool)),
    });

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.http_bind_addr).await?;
    info!("Listening on {}", config.http_bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
