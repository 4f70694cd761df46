use crate::infrastructure::db::database::Database;
use crate::infrastructure::db::dto::LicenseKeyRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::license_key_store::{
    LicenseKeyFilter, LicenseKeyPage, LicenseKeyRepositoryError, LicenseKeyStore, PageRequest,
};
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct LicenseKeyStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

/// Escape LIKE wildcards so the query matches as a literal substring.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl LicenseKeyStorePostgres {
    /// Build a Postgres-backed license key store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn get_impl_conn(
        conn: &mut PgConnection,
        key: String,
    ) -> Result<Option<LicenseKeyRow>, LicenseKeyRepositoryError> {
        let row = sqlx::query_as::<_, LicenseKeyRow>(
            "SELECT
                key,
                key_type,
                custom_days,
                created_at,
                expires_at
            FROM license_keys
            WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| LicenseKeyRepositoryError::StorageUnavailable)?;

        Ok(row)
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: &LicenseKeyRow,
    ) -> Result<LicenseKeyRow, LicenseKeyRepositoryError> {
        let stored = sqlx::query_as::<_, LicenseKeyRow>(
            "INSERT INTO license_keys (
                key,
                key_type,
                custom_days,
                created_at,
                expires_at
            )
            VALUES ($1,$2,$3,$4,$5)
            ON CONFLICT (key) DO NOTHING
            RETURNING
                key,
                key_type,
                custom_days,
                created_at,
                expires_at",
        )
        .bind(&row.key)
        .bind(&row.key_type)
        .bind(row.custom_days)
        .bind(row.created_at)
        .bind(row.expires_at)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| LicenseKeyRepositoryError::StorageUnavailable)?;

        stored.ok_or(LicenseKeyRepositoryError::Conflict)
    }

    async fn list_impl_conn(
        conn: &mut PgConnection,
        filter: LicenseKeyFilter,
        page: PageRequest,
    ) -> Result<LicenseKeyPage, LicenseKeyRepositoryError> {
        let pattern = filter.query.as_deref().map(like_pattern);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)
            FROM license_keys
            WHERE ($1::TEXT IS NULL OR key_type = $1)
              AND ($2::TEXT IS NULL OR key ILIKE $2 ESCAPE '\\')",
        )
        .bind(filter.key_type.as_deref())
        .bind(pattern.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|_| LicenseKeyRepositoryError::StorageUnavailable)?;

        let rows = sqlx::query_as::<_, LicenseKeyRow>(
            "SELECT
                key,
                key_type,
                custom_days,
                created_at,
                expires_at
            FROM license_keys
            WHERE ($1::TEXT IS NULL OR key_type = $1)
              AND ($2::TEXT IS NULL OR key ILIKE $2 ESCAPE '\\')
            ORDER BY created_at DESC, key ASC
            LIMIT $3 OFFSET $4",
        )
        .bind(filter.key_type.as_deref())
        .bind(pattern.as_deref())
        .bind(i64::from(page.page_size))
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|_| LicenseKeyRepositoryError::StorageUnavailable)?;

        Ok(LicenseKeyPage {
            rows,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn delete_impl_conn(
        conn: &mut PgConnection,
        key: String,
    ) -> Result<bool, LicenseKeyRepositoryError> {
        let result = sqlx::query("DELETE FROM license_keys WHERE key = $1")
            .bind(key)
            .execute(&mut *conn)
            .await
            .map_err(|_| LicenseKeyRepositoryError::StorageUnavailable)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LicenseKeyStore for LicenseKeyStorePostgres {
    async fn get(&self, key: &str) -> Result<Option<LicenseKeyRow>, LicenseKeyRepositoryError> {
        let key = key.to_string();
        self.db
            .with_conn(move |conn| Box::pin(Self::get_impl_conn(conn, key)))
            .await
    }

    async fn insert(
        &self,
        row: &LicenseKeyRow,
    ) -> Result<LicenseKeyRow, LicenseKeyRepositoryError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| {
                let row = row;
                Box::pin(async move { Self::insert_impl_conn(conn, &row).await })
            })
            .await
    }

    async fn list(
        &self,
        filter: &LicenseKeyFilter,
        page: PageRequest,
    ) -> Result<LicenseKeyPage, LicenseKeyRepositoryError> {
        let filter = filter.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::list_impl_conn(conn, filter, page)))
            .await
    }

    async fn delete(&self, key: &str) -> Result<bool, LicenseKeyRepositoryError> {
        let key = key.to_string();
        self.db
            .with_conn(move |conn| Box::pin(Self::delete_impl_conn(conn, key)))
            .await
    }

    async fn ping(&self) -> Result<(), LicenseKeyRepositoryError> {
        self.db.ping().await.map_err(Into::into)
    }
}
