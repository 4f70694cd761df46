use crate::infrastructure::db::dto::LicenseKeyRow;
use crate::infrastructure::db::stores::license_key_store::{
    LicenseKeyFilter, LicenseKeyPage, LicenseKeyRepositoryError, LicenseKeyStore, PageRequest,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local key store. Contents are lost on restart.
///
/// The duplicate check and the insert happen under one write lock, so two
/// concurrent creates of the same key cannot both succeed.
#[derive(Debug, Default)]
pub struct LicenseKeyStoreMemory {
    rows: RwLock<HashMap<String, LicenseKeyRow>>,
}

impl LicenseKeyStoreMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<String, LicenseKeyRow>>, LicenseKeyRepositoryError>
    {
        self.rows
            .read()
            .map_err(|_| LicenseKeyRepositoryError::StorageUnavailable)
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<String, LicenseKeyRow>>, LicenseKeyRepositoryError>
    {
        self.rows
            .write()
            .map_err(|_| LicenseKeyRepositoryError::StorageUnavailable)
    }
}

#[async_trait]
impl LicenseKeyStore for LicenseKeyStoreMemory {
    async fn get(&self, key: &str) -> Result<Option<LicenseKeyRow>, LicenseKeyRepositoryError> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn insert(
        &self,
        row: &LicenseKeyRow,
    ) -> Result<LicenseKeyRow, LicenseKeyRepositoryError> {
        let mut rows = self.write()?;
        if rows.contains_key(&row.key) {
            return Err(LicenseKeyRepositoryError::Conflict);
        }
        rows.insert(row.key.clone(), row.clone());
        Ok(row.clone())
    }

    async fn list(
        &self,
        filter: &LicenseKeyFilter,
        page: PageRequest,
    ) -> Result<LicenseKeyPage, LicenseKeyRepositoryError> {
        let rows = self.read()?;
        let mut matched: Vec<&LicenseKeyRow> = rows.values().filter(|r| filter.matches(r)).collect();
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.key.cmp(&b.key))
        });

        let total = matched.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let rows = matched
            .into_iter()
            .skip(offset)
            .take(page.page_size as usize)
            .cloned()
            .collect();

        Ok(LicenseKeyPage { rows, total })
    }

    async fn delete(&self, key: &str) -> Result<bool, LicenseKeyRepositoryError> {
        Ok(self.write()?.remove(key).is_some())
    }

    async fn ping(&self) -> Result<(), LicenseKeyRepositoryError> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::LicenseKeyStoreMemory;
    use crate::infrastructure::db::dto::LicenseKeyRow;
    use crate::infrastructure::db::stores::license_key_store::{
        LicenseKeyFilter, LicenseKeyRepositoryError, LicenseKeyStore, PageRequest,
    };
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};

    fn row(key: &str, key_type: &str, created_at: OffsetDateTime) -> LicenseKeyRow {
        LicenseKeyRow {
            key: key.to_string(),
            key_type: key_type.to_string(),
            custom_days: None,
            created_at,
            expires_at: created_at + Duration::days(1),
        }
    }

    #[tokio::test]
    async fn given_inserted_row_when_get_should_return_same_row() {
        let store = LicenseKeyStoreMemory::new();
        let inserted = row("URAZ-1", "daily", datetime!(2024-01-01 00:00:00 UTC));

        store.insert(&inserted).await.unwrap();

        assert_eq!(store.get("URAZ-1").await.unwrap(), Some(inserted));
        assert_eq!(store.get("uraz-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn given_existing_key_when_insert_should_conflict() {
        let store = LicenseKeyStoreMemory::new();
        let first = row("URAZ-VIP-001", "daily", datetime!(2024-01-01 00:00:00 UTC));
        store.insert(&first).await.unwrap();

        let again = row("URAZ-VIP-001", "weekly", datetime!(2024-01-02 00:00:00 UTC));
        let result = store.insert(&again).await;

        assert_eq!(result, Err(LicenseKeyRepositoryError::Conflict));
        assert_eq!(store.get("URAZ-VIP-001").await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn given_many_rows_when_list_should_order_newest_first_and_window() {
        let store = LicenseKeyStoreMemory::new();
        let base = datetime!(2024-01-01 00:00:00 UTC);
        for i in 0..25 {
            let created = base + Duration::minutes(i);
            store
                .insert(&row(&format!("URAZ-{i:02}"), "daily", created))
                .await
                .unwrap();
        }

        let first = store
            .list(&LicenseKeyFilter::default(), PageRequest::new(1))
            .await
            .unwrap();
        let third = store
            .list(&LicenseKeyFilter::default(), PageRequest::new(3))
            .await
            .unwrap();

        assert_eq!(first.total, 25);
        assert_eq!(first.rows.len(), 10);
        assert_eq!(first.rows[0].key, "URAZ-24");
        assert_eq!(third.rows.len(), 5);
        assert_eq!(third.rows[4].key, "URAZ-00");
    }

    #[tokio::test]
    async fn given_same_created_at_when_list_should_break_ties_by_key() {
        let store = LicenseKeyStoreMemory::new();
        let at = datetime!(2024-01-01 00:00:00 UTC);
        for key in ["URAZ-C", "URAZ-A", "URAZ-B"] {
            store.insert(&row(key, "hourly", at)).await.unwrap();
        }

        let page = store
            .list(&LicenseKeyFilter::default(), PageRequest::new(1))
            .await
            .unwrap();
        let keys: Vec<&str> = page.rows.iter().map(|r| r.key.as_str()).collect();

        assert_eq!(keys, vec!["URAZ-A", "URAZ-B", "URAZ-C"]);
    }

    #[tokio::test]
    async fn given_key_when_deleted_twice_should_report_removed_once() {
        let store = LicenseKeyStoreMemory::new();
        store
            .insert(&row("URAZ-DEL", "daily", datetime!(2024-01-01 00:00:00 UTC)))
            .await
            .unwrap();

        assert!(store.delete("URAZ-DEL").await.unwrap());
        assert!(!store.delete("URAZ-DEL").await.unwrap());
        assert_eq!(store.get("URAZ-DEL").await.unwrap(), None);
    }
}
