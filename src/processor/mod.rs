pub mod alert_dispatcher;
pub mod health_cascade;
