//! Database-backed cache for expensive analysis results
//!
//! Opaque key to JSON payload with an absolute expiry. An expired row reads
//! as a miss; rows are physically removed by `purge_expired_cache`, not on
//! read.

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use sqlx::FromRow;

use super::Database;
use crate::models::CacheEntry;
use crate::Result;

#[derive(Debug, FromRow)]
struct CacheRow {
    key: String,
    data: serde_json::Value,
    expires_at: DateTime<Utc>,
}

impl Database {
    /// Look up a cache entry; expired entries behave as a miss
    pub async fn get_cache(&self, key: &str) -> Result<Option<CacheEntry>> {
        let row = sqlx::query_as::<_, CacheRow>(
            "SELECT key, data, expires_at FROM analysis_cache \
             WHERE key = $1 AND expires_at > NOW()",
        )
        .bind(key)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => {
                tracing::debug!("Cache hit for key {}", row.key);
                Ok(Some(CacheEntry {
                    key: row.key,
                    data: row.data,
                    expires_at: row.expires_at,
                }))
            }
            None => {
                tracing::debug!("Cache miss for key {}", key);
                Ok(None)
            }
        }
    }

    /// Store or overwrite a cache entry with a TTL in hours
    pub async fn put_cache(
        &self,
        key: &str,
        data: &serde_json::Value,
        ttl_hours: i64,
    ) -> Result<DateTime<Utc>> {
        let expires_at = Utc::now() + Duration::hours(ttl_hours);

        sqlx::query(
            "INSERT INTO analysis_cache (key, data, expires_at) VALUES ($1, $2, $3) \
             ON CONFLICT (key) DO UPDATE SET data = $2, expires_at = $3",
        )
        .bind(key)
        .bind(data)
        .bind(expires_at)
        .execute(self.pool())
        .await?;

        tracing::debug!("Cached key {} until {}", key, expires_at);
        Ok(expires_at)
    }

    /// Invalidate one cache entry
    pub async fn delete_cache(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM analysis_cache WHERE key = $1")
            .bind(key)
            .execute(self.pool())
            .await?;

        tracing::debug!("Invalidated cache key {}", key);
        Ok(())
    }

    /// Remove expired cache rows, returning how many were deleted
    pub async fn purge_expired_cache(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM analysis_cache WHERE expires_at <= NOW()")
            .execute(self.pool())
            .await?;

        let removed = result.rows_affected();
        if removed > 0 {
            tracing::info!("🗑️ Purged {} expired cache entries", removed);
        }
        Ok(removed)
    }
}
