//! Video data types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A stored video record.
///
/// `owner_id` is set at creation and never reassigned. `is_published` is
/// mutated only through the explicit owner-gated toggle.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    /// Duration in seconds, derived from the uploaded media.
    pub duration: f64,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Canonical owner projection used by both the listing and single-video
/// responses.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub username: String,
    pub avatar: Option<String>,
}

/// A video enriched with its owner's public fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoWithOwner {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    pub duration: f64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub owner: OwnerSummary,
}

impl VideoWithOwner {
    pub fn new(video: Video, owner: OwnerSummary) -> Self {
        Self {
            id: video.id,
            title: video.title,
            description: video.description,
            video_file: video.video_file,
            thumbnail: video.thumbnail,
            duration: video.duration,
            is_published: video.is_published,
            created_at: video.created_at,
            owner,
        }
    }
}

/// Fields required to create a video record.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    pub duration: f64,
    pub owner_id: Uuid,
}

/// Partial update: only supplied fields are written, omitted fields are
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct VideoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl VideoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.thumbnail.is_none()
    }
}
