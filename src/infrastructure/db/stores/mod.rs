pub mod license_key_store;
