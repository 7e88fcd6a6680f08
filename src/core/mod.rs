pub mod backup;
pub mod config;
pub mod event_log;
pub mod factory;
pub mod log;
pub mod pending;
pub mod photo;
