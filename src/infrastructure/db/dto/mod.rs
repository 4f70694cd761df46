pub mod license_key;

pub use license_key::LicenseKeyRow;
