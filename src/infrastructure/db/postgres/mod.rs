mod database;
pub mod license_key_store_postgres;

pub use database::PostgresDatabase;
