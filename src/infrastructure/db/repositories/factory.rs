use std::sync::Arc;

use crate::infrastructure::db::memory::license_key_store_memory::LicenseKeyStoreMemory;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::postgres::license_key_store_postgres::LicenseKeyStorePostgres;
use crate::infrastructure::db::repositories::license_key_repository::LicenseKeyRepository;
use crate::infrastructure::db::stores::license_key_store::{
    LicenseKeyRepositoryError, LicenseKeyStore,
};

#[derive(Clone)]
pub struct Repositories {
    pub license_key: Arc<LicenseKeyRepository>,
}

impl Repositories {
    /// Build all repositories backed by Postgres stores.
    pub fn postgres(db: Arc<PostgresDatabase>) -> Self {
        Self::from_store(Arc::new(LicenseKeyStorePostgres::new(db)))
    }

    /// Build all repositories backed by process-local memory.
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(LicenseKeyStoreMemory::new()))
    }

    /// Build repositories over an arbitrary store implementation.
    pub fn from_store(store: Arc<dyn LicenseKeyStore>) -> Self {
        Self {
            license_key: Arc::new(LicenseKeyRepository::new(store)),
        }
    }

    /// Check that the backing storage is reachable.
    pub async fn ping(&self) -> Result<(), LicenseKeyRepositoryError> {
        self.license_key.ping().await
    }
}
