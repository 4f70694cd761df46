use crate::domain::value_objects::key_name::KeyName;
use crate::domain::value_objects::timestamps::Timestamp;
use std::fmt;
use thiserror::Error;

/// Upper bound for `custom_days` keys (about a century).
pub const MAX_CUSTOM_DAYS: u32 = 36_500;

/// Duration class of a license key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    CustomDays(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyTypeError {
    #[error("unknown key type: {0}")]
    Unknown(String),
    #[error("custom_days requires a day count")]
    MissingDays,
    #[error("custom_days must be between 1 and {MAX_CUSTOM_DAYS}")]
    DaysOutOfRange,
}

impl KeyType {
    /// Parse the wire name of a type. `days` is only consulted for `custom_days`.
    pub fn parse(kind: &str, days: Option<i64>) -> Result<Self, KeyTypeError> {
        match kind {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "custom_days" => {
                let days = days.ok_or(KeyTypeError::MissingDays)?;
                if days <= 0 || days > i64::from(MAX_CUSTOM_DAYS) {
                    return Err(KeyTypeError::DaysOutOfRange);
                }
                Ok(Self::CustomDays(days as u32))
            }
            other => Err(KeyTypeError::Unknown(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::CustomDays(_) => "custom_days",
        }
    }

    /// Day count for `custom_days`, `None` for the fixed classes.
    pub fn custom_days(&self) -> Option<u32> {
        match self {
            Self::CustomDays(days) => Some(*days),
            _ => None,
        }
    }

    /// Returns `true` when `name` is a valid wire name (used for list filters).
    pub fn is_known_name(name: &str) -> bool {
        matches!(
            name,
            "hourly" | "daily" | "weekly" | "monthly" | "custom_days"
        )
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active/expired state, derived from the clock at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Active,
    Expired,
}

impl KeyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }
}

/// An issued license key. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseKey {
    pub key: KeyName,
    pub key_type: KeyType,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl LicenseKey {
    /// Expiry is exclusive: a key whose `expires_at` equals `now` is expired.
    pub fn status_at(&self, now: Timestamp) -> KeyStatus {
        if now < self.expires_at {
            KeyStatus::Active
        } else {
            KeyStatus::Expired
        }
    }

    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.status_at(now) == KeyStatus::Active
    }
}
