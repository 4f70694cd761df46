pub mod license_key_types;
