use crate::domain::entities::license_key::LicenseKey;
use crate::infrastructure::db::dto::LicenseKeyRow;
use crate::infrastructure::db::stores::license_key_store::{
    LicenseKeyFilter, LicenseKeyRepositoryError, LicenseKeyStore, PageRequest,
};
use std::sync::Arc;

/// A page of domain records plus the unwindowed match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseKeyListing {
    pub items: Vec<LicenseKey>,
    pub total: u64,
}

pub struct LicenseKeyRepository {
    store: Arc<dyn LicenseKeyStore>,
}

impl LicenseKeyRepository {
    /// Build a repository that uses the given store implementation.
    pub fn new(store: Arc<dyn LicenseKeyStore>) -> Self {
        Self { store }
    }

    /// Create a key record. Fails with `Conflict` if the key already exists.
    pub async fn create(&self, license: &LicenseKey) -> Result<LicenseKey, LicenseKeyRepositoryError> {
        let row = LicenseKeyRow::from_license_key(license);
        let stored = self.store.insert(&row).await?;
        stored
            .into_license_key()
            .ok_or(LicenseKeyRepositoryError::InvalidInput)
    }

    /// Fetch a key record. Returns `None` if it doesn't exist.
    pub async fn find(&self, key: &str) -> Result<Option<LicenseKey>, LicenseKeyRepositoryError> {
        match self.store.get(key).await? {
            Some(row) => row
                .into_license_key()
                .map(Some)
                .ok_or(LicenseKeyRepositoryError::InvalidInput),
            None => Ok(None),
        }
    }

    /// List key records newest-first.
    pub async fn list(
        &self,
        filter: &LicenseKeyFilter,
        page: PageRequest,
    ) -> Result<LicenseKeyListing, LicenseKeyRepositoryError> {
        let page = self.store.list(filter, page).await?;
        let items = page
            .rows
            .into_iter()
            .map(|row| {
                row.into_license_key()
                    .ok_or(LicenseKeyRepositoryError::InvalidInput)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LicenseKeyListing {
            items,
            total: page.total,
        })
    }

    /// Delete a key record. Missing keys are not an error.
    pub async fn delete(&self, key: &str) -> Result<bool, LicenseKeyRepositoryError> {
        self.store.delete(key).await
    }

    pub async fn ping(&self) -> Result<(), LicenseKeyRepositoryError> {
        self.store.ping().await
    }
}
