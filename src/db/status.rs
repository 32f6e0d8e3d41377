//! Status check records
//!
//! Clients announce themselves by name; the service records who and when.
//! UUIDs are stored as TEXT, timestamps as UTC TEXT via sqlx's chrono
//! support.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Most rows a single list call will return.
pub const STATUS_LIST_LIMIT: i64 = 1000;

/// One recorded client check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Record a check-in for `client_name`, stamped now.
pub async fn insert_status_check(pool: &SqlitePool, client_name: &str) -> Result<StatusCheck> {
    let check = StatusCheck {
        id: Uuid::new_v4(),
        client_name: client_name.to_string(),
        timestamp: Utc::now(),
    };

    sqlx::query("INSERT INTO status_checks (id, client_name, timestamp) VALUES (?, ?, ?)")
        .bind(check.id.to_string())
        .bind(&check.client_name)
        .bind(check.timestamp)
        .execute(pool)
        .await?;

    Ok(check)
}

/// List recorded check-ins, oldest first, capped at [`STATUS_LIST_LIMIT`].
pub async fn list_status_checks(pool: &SqlitePool) -> Result<Vec<StatusCheck>> {
    let rows: Vec<(String, String, DateTime<Utc>)> = sqlx::query_as(
        "SELECT id, client_name, timestamp FROM status_checks ORDER BY timestamp LIMIT ?",
    )
    .bind(STATUS_LIST_LIMIT)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(id, client_name, timestamp)| {
            let id = Uuid::parse_str(&id)
                .map_err(|e| Error::Internal(format!("corrupt status check id '{}': {}", id, e)))?;
            Ok(StatusCheck {
                id,
                client_name,
                timestamp,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::create_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let pool = memory_pool().await;

        let created = insert_status_check(&pool, "test_client").await.unwrap();
        assert_eq!(created.client_name, "test_client");

        let listed = list_status_checks(&pool).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].client_name, "test_client");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let pool = memory_pool().await;
        assert!(list_status_checks(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_each_check_gets_unique_id() {
        let pool = memory_pool().await;

        let a = insert_status_check(&pool, "same_name").await.unwrap();
        let b = insert_status_check(&pool, "same_name").await.unwrap();
        assert_ne!(a.id, b.id);

        assert_eq!(list_status_checks(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_timestamp_roundtrips_in_utc() {
        let pool = memory_pool().await;

        let before = Utc::now();
        let created = insert_status_check(&pool, "clock_check").await.unwrap();
        let after = Utc::now();

        let listed = list_status_checks(&pool).await.unwrap();
        assert_eq!(listed[0].timestamp, created.timestamp);
        assert!(created.timestamp >= before && created.timestamp <= after);
    }
}
