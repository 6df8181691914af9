/**
 * Tweet Store
 *
 * Database operations for tweets. Update and delete carry the owner in the
 * WHERE clause of a single statement; a miss means "not found or not yours"
 * and the store does not distinguish the two.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::tweets::model::Tweet;

/// Persistence operations for tweets.
#[async_trait]
pub trait TweetStore: Send + Sync + 'static {
    /// Insert a new tweet for `owner`.
    async fn create(&self, owner: Uuid, content: String) -> Result<Tweet, sqlx::Error>;

    /// All tweets by one owner, newest first.
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Tweet>, sqlx::Error>;

    /// Replace the content of a tweet owned by `owner`. Returns `None` when
    /// the combined id+owner lookup matches nothing.
    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        content: String,
    ) -> Result<Option<Tweet>, sqlx::Error>;

    /// Delete a tweet owned by `owner`. Returns whether a record was
    /// removed.
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, sqlx::Error>;
}

/// PostgreSQL-backed tweet store.
pub struct PgTweetStore {
    pool: PgPool,
}

impl PgTweetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetStore for PgTweetStore {
    async fn create(&self, owner: Uuid, content: String) -> Result<Tweet, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let tweet = sqlx::query_as::<_, Tweet>(
            r#"
            INSERT INTO tweets (id, content, owner_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(&content)
        .bind(owner)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(tweet)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Tweet>, sqlx::Error> {
        let tweets = sqlx::query_as::<_, Tweet>(
            r#"
            SELECT id, content, owner_id, created_at
            FROM tweets
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tweets)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        content: String,
    ) -> Result<Option<Tweet>, sqlx::Error> {
        let tweet = sqlx::query_as::<_, Tweet>(
            r#"
            UPDATE tweets
            SET content = $3
            WHERE id = $1 AND owner_id = $2
            RETURNING id, content, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tweet)
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tweets WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
