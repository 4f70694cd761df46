// Use case: delete_license_key.

use crate::application::context::AppContext;
use crate::application::shared::license_key_types::LicenseKeyUseCaseError;
use tracing::info;

/// Result of a delete. `removed` is false when the key did not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteLicenseKeyResult {
    pub removed: bool,
}

/// Removes a key record. Deleting an unknown key succeeds.
pub struct DeleteLicenseKeyUseCase;

impl DeleteLicenseKeyUseCase {
    pub async fn execute(
        ctx: &AppContext,
        key: &str,
    ) -> Result<DeleteLicenseKeyResult, LicenseKeyUseCaseError> {
        let key = key.trim();
        if key.is_empty() {
            return Ok(DeleteLicenseKeyResult { removed: false });
        }

        let removed = ctx.repos.license_key.delete(key).await?;
        if removed {
            info!(key, "license_key_deleted");
        }

        Ok(DeleteLicenseKeyResult { removed })
    }
}
