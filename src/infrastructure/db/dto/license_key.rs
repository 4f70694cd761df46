use crate::domain::entities::license_key::{KeyType, LicenseKey};
use crate::domain::value_objects::key_name::KeyName;
use crate::domain::value_objects::timestamps::Timestamp;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LicenseKeyRow {
    pub key: String,
    pub key_type: String,
    pub custom_days: Option<i32>,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl LicenseKeyRow {
    pub fn from_license_key(license: &LicenseKey) -> Self {
        Self {
            key: license.key.as_str().to_string(),
            key_type: license.key_type.as_str().to_string(),
            custom_days: license.key_type.custom_days().map(|d| d as i32),
            created_at: license.created_at.as_inner(),
            expires_at: license.expires_at.as_inner(),
        }
    }

    /// Map back to the domain entity. Returns `None` for rows the domain cannot represent.
    pub fn into_license_key(self) -> Option<LicenseKey> {
        let key = KeyName::parse(&self.key).ok()?;
        let key_type = KeyType::parse(&self.key_type, self.custom_days.map(i64::from)).ok()?;
        Some(LicenseKey {
            key,
            key_type,
            created_at: Timestamp::from(self.created_at),
            expires_at: Timestamp::from(self.expires_at),
        })
    }
}
