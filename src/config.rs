use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub http_bind_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub log_level: String,
    pub twilio: Option<TwilioConfig>,
    pub notify_timeout_secs: u64,
}

/// Credentials for the SMS/WhatsApp gateway. Absent when the account SID or
/// auth token is not set, in which case messages are only logged.
#[derive(Debug, Deserialize, Clone)]
pub struct TwilioConfig {
    pub api_base: String,
    pub account_sid: String,
    pub auth_token: String,
    pub sms_from: String,
    pub whatsapp_from: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let http_host = env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let http_port = env::var("HTTP_PORT").unwrap_or_else(|_| "3000".to_string());
        let http_bind_addr = format!("{}:{}", http_host, http_port);

        let db_host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let db_name = env::var("DB_DATABASE").unwrap_or_else(|_| "water_quality".to_string());
        let db_user = env::var("DB_USER").unwrap_or_else(|_| "water".to_string());
        let db_pwd = env::var("DB_PWD").unwrap_or_else(|_| "water".to_string());

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            db_user, db_pwd, db_host, db_port, db_name
        );
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .unwrap_or(20);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let twilio = match (
            env::var("TWILIO_ACCOUNT_SID").ok().filter(|s| !s.is_empty()),
            env::var("TWILIO_AUTH_TOKEN").ok().filter(|s| !s.is_empty()),
        ) {
            (Some(account_sid), Some(auth_token)) => Some(TwilioConfig {
                api_base: env::var("TWILIO_API_BASE")
                    .unwrap_or_else(|_| "https://api.twilio.com".to_string()),
                account_sid,
                auth_token,
                sms_from: env::var("TWILIO_SMS_FROM").unwrap_or_default(),
                whatsapp_from: env::var("TWILIO_WHATSAPP_FROM").unwrap_or_default(),
            }),
            _ => None,
        };

        let notify_timeout_secs = env::var("NOTIFY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Ok(Self {
            http_bind_addr,
            database_url,
            db_max_connections,
            log_level,
            twilio,
            notify_timeout_secs,
        })
    }
}
