use crate::infrastructure::db::stores::license_key_store::LicenseKeyRepositoryError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LicenseKeyUseCaseError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("key already exists")]
    Conflict,
    #[error("key not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<LicenseKeyRepositoryError> for LicenseKeyUseCaseError {
    fn from(err: LicenseKeyRepositoryError) -> Self {
        match err {
            LicenseKeyRepositoryError::Conflict => Self::Conflict,
            other => Self::Storage(format!("{other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LicenseKeyUseCaseError;
    use crate::infrastructure::db::stores::license_key_store::LicenseKeyRepositoryError;

    #[test]
    fn given_repository_errors_when_converted_should_keep_conflict_and_wrap_storage() {
        assert_eq!(
            LicenseKeyUseCaseError::from(LicenseKeyRepositoryError::Conflict),
            LicenseKeyUseCaseError::Conflict
        );
        assert!(matches!(
            LicenseKeyUseCaseError::from(LicenseKeyRepositoryError::StorageUnavailable),
            LicenseKeyUseCaseError::Storage(_)
        ));
    }
}
