//! Tweet data types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A stored tweet.
///
/// Content is guaranteed non-blank after trimming, enforced at creation and
/// at update.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: Uuid,
    pub content: String,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}
