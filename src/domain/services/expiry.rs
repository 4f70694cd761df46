use crate::domain::entities::license_key::{KeyType, KeyTypeError};
use crate::domain::value_objects::timestamps::Timestamp;
use thiserror::Error;
use time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiryError {
    #[error(transparent)]
    InvalidType(#[from] KeyTypeError),
    #[error("expiry is outside the representable time range")]
    OutOfRange,
}

/// Maps a key type onto its lifetime and computes absolute expiry times.
///
/// Months are a fixed 30 days, not calendar months.
pub struct ExpiryCalculator;

impl ExpiryCalculator {
    /// Lifetime granted by a key type.
    pub fn lifetime(key_type: KeyType) -> Duration {
        match key_type {
            KeyType::Hourly => Duration::hours(1),
            KeyType::Daily => Duration::days(1),
            KeyType::Weekly => Duration::days(7),
            KeyType::Monthly => Duration::days(30),
            KeyType::CustomDays(days) => Duration::days(i64::from(days)),
        }
    }

    /// Expiry for an already-parsed type.
    pub fn compute(key_type: KeyType, base: Timestamp) -> Result<Timestamp, ExpiryError> {
        base.checked_add(Self::lifetime(key_type))
            .ok_or(ExpiryError::OutOfRange)
    }

    /// Parse a wire type name and compute its expiry in one step.
    pub fn compute_named(
        kind: &str,
        days: Option<i64>,
        base: Timestamp,
    ) -> Result<(KeyType, Timestamp), ExpiryError> {
        let key_type = KeyType::parse(kind, days)?;
        let expires_at = Self::compute(key_type, base)?;
        Ok((key_type, expires_at))
    }
}
