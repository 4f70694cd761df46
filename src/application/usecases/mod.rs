pub mod delete_license_key;
pub mod get_license_key;
pub mod issue_license_key;
pub mod list_license_keys;
pub mod validate_license_key;
