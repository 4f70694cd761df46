// Use case: get_license_key.

use crate::application::context::AppContext;
use crate::application::shared::license_key_types::LicenseKeyUseCaseError;
use crate::domain::entities::license_key::{KeyStatus, LicenseKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseKeyDetails {
    pub license: LicenseKey,
    pub status: KeyStatus,
}

/// Fetches one key record with its status as of now.
pub struct GetLicenseKeyUseCase;

impl GetLicenseKeyUseCase {
    pub async fn execute(
        ctx: &AppContext,
        key: &str,
    ) -> Result<LicenseKeyDetails, LicenseKeyUseCaseError> {
        let license = ctx
            .repos
            .license_key
            .find(key.trim())
            .await?
            .ok_or(LicenseKeyUseCaseError::NotFound)?;
        let status = license.status_at(ctx.clock.now());

        Ok(LicenseKeyDetails { license, status })
    }
}
