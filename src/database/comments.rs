use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

use super::Database;
use crate::models::Comment;
use crate::models::Sentiment;
use crate::Result;
use crate::TubePulseError;

/// Comment row as stored; sentiment is persisted as text
#[derive(Debug, Clone, FromRow)]
struct CommentRow {
    id: Uuid,
    video_id: String,
    text: String,
    votes: i64,
    hearted: bool,
    replies: i64,
    published_at: DateTime<Utc>,
    sentiment: String,
    sentiment_score: Option<f64>,
    recorded_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            video_id: row.video_id,
            text: row.text,
            votes: row.votes,
            hearted: row.hearted,
            replies: row.replies,
            published_at: row.published_at,
            // Anything unrecognized at the storage boundary reads as neutral
            sentiment: Sentiment::parse(&row.sentiment),
            sentiment_score: row.sentiment_score,
            recorded_at: row.recorded_at,
        }
    }
}

/// Stored-comment counts for the stats endpoint
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct CommentStats {
    pub total_comments: i64,
    pub total_videos: i64,
    pub labeled_positive: i64,
    pub labeled_neutral: i64,
    pub labeled_negative: i64,
}

impl Database {
    /// Fetch all stored comments for a video, newest first
    pub async fn find_comments(&self, video_id: &str) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT * FROM comments WHERE video_id = $1 ORDER BY published_at DESC",
        )
        .bind(video_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    /// Replace a video's comment set: delete everything stored for the video,
    /// then insert the new set in one transaction.
    ///
    /// Concurrent replacements for the same video are not de-duplicated; the
    /// last writer wins.
    pub async fn replace_comments(&self, video_id: &str, comments: &[Comment]) -> Result<usize> {
        if video_id.is_empty() {
            return Err(TubePulseError::InvalidRequest(
                "video_id must not be empty".to_string(),
            ));
        }
        for comment in comments {
            if comment.video_id != video_id {
                return Err(TubePulseError::InvalidRequest(format!(
                    "comment belongs to video {} but {} was being replaced",
                    comment.video_id, video_id
                )));
            }
            if comment.text.is_empty() {
                return Err(TubePulseError::InvalidRequest(
                    "comment text must not be empty".to_string(),
                ));
            }
        }

        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM comments WHERE video_id = $1")
            .bind(video_id)
            .execute(&mut *tx)
            .await?;

        for chunk in comments.chunks(500) {
            let mut query_builder = sqlx::QueryBuilder::new(
                "INSERT INTO comments (id, video_id, text, votes, hearted, replies, \
                 published_at, sentiment, sentiment_score, recorded_at) ",
            );

            query_builder.push_values(chunk, |mut b, comment| {
                b.push_bind(comment.id)
                    .push_bind(&comment.video_id)
                    .push_bind(&comment.text)
                    .push_bind(comment.votes)
                    .push_bind(comment.hearted)
                    .push_bind(comment.replies)
                    .push_bind(comment.published_at)
                    .push_bind(comment.sentiment.as_str())
                    .push_bind(comment.sentiment_score)
                    .push_bind(comment.recorded_at);
            });

            let query = query_builder.build();
            query.execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "💾 Replaced comment set for video {}: {} comments stored",
            video_id,
            comments.len()
        );
        Ok(comments.len())
    }

    /// Count stored comments and videos for the stats endpoint
    pub async fn comment_stats(&self) -> Result<CommentStats> {
        let total_comments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(self.pool())
            .await?;

        let total_videos =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT video_id) FROM comments")
                .fetch_one(self.pool())
                .await?;

        let labeled = |sentiment: &'static str| {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE sentiment = $1")
                .bind(sentiment)
                .fetch_one(self.pool())
        };

        Ok(CommentStats {
            total_comments,
            total_videos,
            labeled_positive: labeled("positive").await?,
            labeled_neutral: labeled("neutral").await?,
            labeled_negative: labeled("negative").await?,
        })
    }
}
