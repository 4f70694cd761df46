pub mod license_key_store_memory;

pub use license_key_store_memory::LicenseKeyStoreMemory;
