pub mod alert;
pub mod request;
pub mod user;
