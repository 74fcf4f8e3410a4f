use std::{str::FromStr, time::Duration};

use sqlx::{
    Error, SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use tracing::info;

pub mod models;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct DBService {
    pub pool: SqlitePool,
}

impl DBService {
    /// Opens (creating if needed) the database at `database_url` and applies
    /// pending migrations.
    pub async fn new(database_url: &str) -> Result<DBService, Error> {
        let db = Self::connect(database_url).await?;
        Self::migrate(&db.pool).await?;
        info!(database_url, "Database ready");

        Ok(db)
    }

    /// Opens the database without touching its schema.
    pub async fn connect(database_url: &str) -> Result<DBService, Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(DBService { pool })
    }

    /// Private in-memory database. A single long-lived connection keeps the
    /// data alive for the lifetime of the pool.
    pub async fn new_in_memory() -> Result<DBService, Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::migrate(&pool).await?;

        Ok(DBService { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), Error> {
        MIGRATOR.run(pool).await?;
        Ok(())
    }
}

/// Unique constraint failed (duplicate room name, customer email, ...).
pub fn is_unique_violation(err: &Error) -> bool {
    matches!(err, Error::Database(db_err) if db_err.is_unique_violation())
}

/// Row is still referenced by another table.
pub fn is_foreign_key_violation(err: &Error) -> bool {
    matches!(err, Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_has_schema() {
        let db = DBService::new_in_memory().await.unwrap();
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' AND name NOT LIKE 'sqlite%' ORDER BY name",
        )
        .fetch_all(&db.pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["admin_users", "bookings", "customers", "rooms"]);
    }

    #[tokio::test]
    async fn test_connect_leaves_schema_alone() {
        let db = DBService::connect("sqlite::memory:").await.unwrap();
        let tables: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(tables, 0);
    }
}
