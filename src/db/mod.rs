//! Database management
//!
//! SQLite via sqlx, file-backed in production (`mode=rwc` so first run
//! creates the file). The schema is one table of status check-ins; schema
//! creation is idempotent and runs on every startup.

pub mod status;

use crate::error::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

/// Connect to the database and ensure the schema exists.
pub async fn initialize_database(database_path: &str) -> Result<SqlitePool> {
    info!("Initializing database: {}", database_path);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&format!("sqlite:{}?mode=rwc", database_path))
        .await?;

    create_schema(&pool).await?;

    info!("Database initialized successfully");
    Ok(pool)
}

/// Create any missing tables.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS status_checks (
            id TEXT PRIMARY KEY,
            client_name TEXT NOT NULL,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        // One connection: every pooled connection to :memory: would
        // otherwise be its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let pool = memory_pool().await;
        create_schema(&pool).await.unwrap();
        create_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_initialize_database_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.db");

        let pool = initialize_database(path.to_str().unwrap()).await.unwrap();
        assert!(path.exists());

        sqlx::query("SELECT COUNT(*) FROM status_checks")
            .fetch_one(&pool)
            .await
            .unwrap();
        pool.close().await;
    }
}
