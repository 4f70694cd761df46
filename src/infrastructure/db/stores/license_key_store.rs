use crate::infrastructure::db::database::DatabaseError;
use crate::infrastructure::db::dto::LicenseKeyRow;
use async_trait::async_trait;

/// Fixed page size for key listings.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseKeyRepositoryError {
    Conflict,
    InvalidInput,
    StorageUnavailable,
}

impl From<DatabaseError> for LicenseKeyRepositoryError {
    fn from(_: DatabaseError) -> Self {
        LicenseKeyRepositoryError::StorageUnavailable
    }
}

/// Listing filter. Both fields are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseKeyFilter {
    /// Exact match on the stored type name.
    pub key_type: Option<String>,
    /// Case-insensitive literal substring of the key.
    pub query: Option<String>,
}

impl LicenseKeyFilter {
    pub fn matches(&self, row: &LicenseKeyRow) -> bool {
        if let Some(key_type) = self.key_type.as_deref() {
            if row.key_type != key_type {
                return false;
            }
        }
        if let Some(query) = self.query.as_deref() {
            if !row.key.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Build a request with the fixed page size; pages below 1 clamp to 1.
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: PAGE_SIZE,
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Total page count for `total` rows; never below 1.
    pub fn total_pages(&self, total: u64) -> u32 {
        let size = u64::from(self.page_size.max(1));
        let pages = total.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// One window of rows plus the unwindowed match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseKeyPage {
    pub rows: Vec<LicenseKeyRow>,
    pub total: u64,
}

#[async_trait]
pub trait LicenseKeyStore: Send + Sync {
    /// Fetch a key record. Returns `None` if it doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<LicenseKeyRow>, LicenseKeyRepositoryError>;
    /// Insert a new record and return what was stored. Fails with `Conflict` if the key exists.
    async fn insert(&self, row: &LicenseKeyRow)
    -> Result<LicenseKeyRow, LicenseKeyRepositoryError>;
    /// List records newest-first (ties broken by key), windowed by `page`.
    async fn list(
        &self,
        filter: &LicenseKeyFilter,
        page: PageRequest,
    ) -> Result<LicenseKeyPage, LicenseKeyRepositoryError>;
    /// Remove a record. Returns whether a record was actually removed.
    async fn delete(&self, key: &str) -> Result<bool, LicenseKeyRepositoryError>;
    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), LicenseKeyRepositoryError>;
}
