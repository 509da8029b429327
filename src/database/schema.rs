use super::Database;
use crate::Result;
use crate::TubePulseError;

impl Database {
    /// Check if database schema is initialized
    /// Returns true if all required tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        let required_tables = vec!["comments", "analysis_cache"];

        for table_name in required_tables {
            let result = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(self.pool())
            .await?;

            if !result {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Verify database schema or return helpful error
    pub async fn verify_schema_or_error(&self) -> Result<()> {
        if !self.is_schema_initialized().await? {
            return Err(TubePulseError::Custom(
                "❌ Database schema not initialized!\n\n\
                 Please run the following command to initialize the database:\n\n\
                 \x1b[1;32mtubepulse init\x1b[0m\n\n\
                 Then try again."
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        // Comments: one row per audience comment, replaced wholesale per video
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS comments (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                video_id TEXT NOT NULL,
                text TEXT NOT NULL CHECK (text <> ''),
                votes BIGINT NOT NULL DEFAULT 0 CHECK (votes >= 0),
                hearted BOOLEAN NOT NULL DEFAULT FALSE,
                replies BIGINT NOT NULL DEFAULT 0 CHECK (replies >= 0),
                published_at TIMESTAMPTZ NOT NULL,
                sentiment TEXT NOT NULL DEFAULT 'neutral'
                    CHECK (sentiment IN ('positive', 'neutral', 'negative')),
                sentiment_score DOUBLE PRECISION,
                recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_comments_video_id
                ON comments (video_id)
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_comments_video_published
                ON comments (video_id, published_at DESC)
            ",
        )
        .execute(self.pool())
        .await?;

        // Cache: opaque key to JSON payload with absolute expiry
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS analysis_cache (
                key TEXT PRIMARY KEY,
                data JSONB NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_analysis_cache_expires
                ON analysis_cache (expires_at)
            ",
        )
        .execute(self.pool())
        .await?;

        tracing::info!("✅ Database schema initialized");
        Ok(())
    }
}
