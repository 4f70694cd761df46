pub mod license_key;
