/**
 * Video Store
 *
 * Database operations for video records. Mutations that require ownership
 * carry the owner in the WHERE clause of a single statement, so the
 * ownership check and the write cannot be separated by a concurrent
 * request.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::videos::model::{NewVideo, OwnerSummary, Video, VideoChanges, VideoWithOwner};
use crate::videos::query::{SortDirection, SortField, VideoListing, VideoPredicate};

/// Persistence operations for videos.
#[async_trait]
pub trait VideoStore: Send + Sync + 'static {
    /// Insert a new video record, published by default.
    async fn create(&self, new: NewVideo) -> Result<Video, sqlx::Error>;

    /// Fetch a video by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, sqlx::Error>;

    /// Fetch a video by id with its owner's public fields.
    async fn find_with_owner(&self, id: Uuid) -> Result<Option<VideoWithOwner>, sqlx::Error>;

    /// Run a listing query. Returns the page of matching videos and the
    /// total count across all pages of the same filter.
    async fn list(&self, listing: &VideoListing) -> Result<(Vec<VideoWithOwner>, u64), sqlx::Error>;

    /// Apply a partial update to a video owned by `owner`.
    ///
    /// Only supplied fields are written. Returns `None` when no record
    /// matches the combined id+owner lookup; callers must not disclose
    /// which of the two conditions failed.
    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: VideoChanges,
    ) -> Result<Option<Video>, sqlx::Error>;

    /// Delete a video owned by `owner`. Returns whether a record was
    /// removed.
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, sqlx::Error>;

    /// Flip the publish flag of a video owned by `owner` in a single
    /// statement. Returns the new state, or `None` if nothing matched.
    async fn toggle_publish_owned(&self, id: Uuid, owner: Uuid)
        -> Result<Option<bool>, sqlx::Error>;
}

/// PostgreSQL-backed video store.
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const VIDEO_COLUMNS: &str =
    "id, title, description, video_file, thumbnail, duration, owner_id, is_published, created_at";

/// Escape LIKE metacharacters so the search term is matched literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Append the listing predicates as an ANDed WHERE body.
///
/// Predicate values are always bound, never spliced into the SQL text.
fn push_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[VideoPredicate]) {
    let mut clauses = builder.separated(" AND ");
    for predicate in predicates {
        match predicate {
            VideoPredicate::Published => {
                clauses.push("v.is_published = TRUE");
            }
            VideoPredicate::OwnedBy(owner) => {
                clauses.push("v.owner_id = ");
                clauses.push_bind_unseparated(*owner);
            }
            VideoPredicate::TextMatch(term) => {
                let pattern = like_pattern(term);
                clauses.push("(v.title ILIKE ");
                clauses.push_bind_unseparated(pattern.clone());
                clauses.push_unseparated(" OR v.description ILIKE ");
                clauses.push_bind_unseparated(pattern);
                clauses.push_unseparated(")");
            }
        }
    }
}

/// Convert the pagination skip to a Postgres OFFSET parameter.
///
/// `page` and `limit` both parse up to `u32::MAX`, so their product can
/// exceed `i64::MAX`; saturating keeps the offset non-negative (the window
/// is empty either way).
fn offset_param(skip: u64) -> i64 {
    i64::try_from(skip).unwrap_or(i64::MAX)
}

fn sort_sql(field: SortField, direction: SortDirection) -> &'static str {
    // Closed enum to static SQL: no request-supplied field name is ever
    // interpolated.
    match (field, direction) {
        (SortField::CreatedAt, SortDirection::Ascending) => "v.created_at ASC",
        (SortField::CreatedAt, SortDirection::Descending) => "v.created_at DESC",
        (SortField::Title, SortDirection::Ascending) => "v.title ASC",
        (SortField::Title, SortDirection::Descending) => "v.title DESC",
        (SortField::Duration, SortDirection::Ascending) => "v.duration ASC",
        (SortField::Duration, SortDirection::Descending) => "v.duration DESC",
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn create(&self, new: NewVideo) -> Result<Video, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (id, title, description, video_file, thumbnail, duration, owner_id, is_published, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8)
            RETURNING id, title, description, video_file, thumbnail, duration, owner_id, is_published, created_at
            "#,
        )
        .bind(id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.video_file)
        .bind(&new.thumbnail)
        .bind(new.duration)
        .bind(new.owner_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, sqlx::Error> {
        let video = sqlx::query_as::<_, Video>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn find_with_owner(&self, id: Uuid) -> Result<Option<VideoWithOwner>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT v.id, v.title, v.description, v.video_file, v.thumbnail, v.duration,
                   v.is_published, v.created_at,
                   u.id AS owner_id, u.username, u.avatar
            FROM videos v
            JOIN users u ON u.id = v.owner_id
            WHERE v.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| row_to_video_with_owner(&r)))
    }

    async fn list(
        &self,
        listing: &VideoListing,
    ) -> Result<(Vec<VideoWithOwner>, u64), sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT v.id, v.title, v.description, v.video_file, v.thumbnail, v.duration, \
             v.is_published, v.created_at, u.id AS owner_id, u.username, u.avatar \
             FROM videos v JOIN users u ON u.id = v.owner_id WHERE ",
        );
        push_predicates(&mut query, &listing.predicates);
        query.push(" ORDER BY ");
        query.push(sort_sql(listing.sort.field, listing.sort.direction));
        query.push(" LIMIT ");
        query.push_bind(i64::from(listing.page.size));
        query.push(" OFFSET ");
        query.push_bind(offset_param(listing.page.skip()));

        let rows = query.build().fetch_all(&self.pool).await?;
        let videos = rows.iter().map(row_to_video_with_owner).collect();

        // Total is counted against the same filter, without the window.
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM videos v WHERE ");
        push_predicates(&mut count, &listing.predicates);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((videos, total as u64))
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: VideoChanges,
    ) -> Result<Option<Video>, sqlx::Error> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                thumbnail = COALESCE($5, thumbnail)
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, description, video_file, thumbnail, duration, owner_id, is_published, created_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.thumbnail)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_publish_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> Result<Option<bool>, sqlx::Error> {
        let state = sqlx::query_scalar::<_, bool>(
            r#"
            UPDATE videos
            SET is_published = NOT is_published
            WHERE id = $1 AND owner_id = $2
            RETURNING is_published
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(state)
    }
}

fn row_to_video_with_owner(row: &sqlx::postgres::PgRow) -> VideoWithOwner {
    VideoWithOwner {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        video_file: row.get("video_file"),
        thumbnail: row.get("thumbnail"),
        duration: row.get("duration"),
        is_published: row.get("is_published"),
        created_at: row.get("created_at"),
        owner: OwnerSummary {
            id: row.get("owner_id"),
            username: row.get("username"),
            avatar: row.get("avatar"),
        },
    }
}
