pub mod health;
pub mod license_key;
pub mod metrics;
pub mod mobile;
pub mod ready;
