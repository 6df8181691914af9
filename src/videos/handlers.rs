/**
 * Video Handlers
 *
 * Listing, publishing and ownership-gated mutation of videos.
 *
 * Two signal shapes exist for failed ownership checks, matching the store
 * contract each operation uses:
 * - update goes through the combined id+owner lookup and reports 404
 *   "not found or unauthorized" without disclosing which condition failed;
 * - delete and publish-toggle load the record first and report 404 (absent)
 *   and 403 (present but not owned) distinctly.
 */

use axum::extract::{Multipart, Path, Query, State};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::server::state::AppState;
use crate::uploads::orchestrator;
use crate::uploads::MediaFile;
use crate::validation;
use crate::videos::model::{NewVideo, Video, VideoChanges, VideoWithOwner};
use crate::videos::query::{PageInfo, RawListParams, VideoListing};

/// Payload of the listing endpoint.
#[derive(Debug, Serialize)]
pub struct VideoListPayload {
    pub videos: Vec<VideoWithOwner>,
    pub pagination: PageInfo,
}

/// GET /api/v1/videos
///
/// Lists published videos. Supports free-text search over title and
/// description, an owner filter, field sorting and pagination; see
/// `videos::query` for the coercion rules applied to the raw parameters.
pub async fn list_videos(
    State(state): State<AppState>,
    Query(raw): Query<RawListParams>,
) -> Result<ApiResponse<VideoListPayload>, ApiError> {
    let listing = VideoListing::from_params(&raw);

    let (videos, total) = state.videos.list(&listing).await?;
    let pagination = PageInfo::new(total, &listing.page);

    Ok(ApiResponse::ok(
        VideoListPayload { videos, pagination },
        "Videos fetched successfully",
    ))
}

/// Multipart fields accepted by publish and update.
#[derive(Default)]
struct VideoForm {
    title: Option<String>,
    description: Option<String>,
    video_file: Option<MediaFile>,
    thumbnail: Option<MediaFile>,
}

async fn read_video_form(mut multipart: Multipart) -> Result<VideoForm, ApiError> {
    let mut form = VideoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::MalformedBody(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("title") => {
                form.title = Some(read_text(field).await?);
            }
            Some("description") => {
                form.description = Some(read_text(field).await?);
            }
            Some("videoFile") => {
                form.video_file = Some(read_file(field, "video").await?);
            }
            Some("thumbnail") => {
                form.thumbnail = Some(read_file(field, "thumbnail").await?);
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::MalformedBody(e.to_string()))
}

async fn read_file(
    field: axum::extract::multipart::Field<'_>,
    fallback_name: &str,
) -> Result<MediaFile, ApiError> {
    let name = field.file_name().unwrap_or(fallback_name).to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::MalformedBody(e.to_string()))?;

    Ok(MediaFile { name, bytes })
}

/// POST /api/v1/videos
///
/// Publishes a video: validates the multipart fields, uploads the media
/// file and thumbnail to the external host (in that order, before any store
/// write), then persists the record referencing the returned URLs. The
/// record is published by default; duration comes from the media upload.
pub async fn publish_video(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<ApiResponse<Video>, ApiError> {
    let form = read_video_form(multipart).await?;

    let title = validation::require_text("title", form.title.as_deref())?;
    let description = validation::require_text("description", form.description.as_deref())?;
    let video_file = form.video_file.ok_or(ApiError::missing("videoFile"))?;
    let thumbnail = form.thumbnail.ok_or(ApiError::missing("thumbnail"))?;

    let assets =
        orchestrator::upload_video_assets(state.media.as_ref(), &video_file, &thumbnail).await?;

    let video = state
        .videos
        .create(NewVideo {
            title,
            description,
            video_file: assets.video.url,
            thumbnail: assets.thumbnail.url,
            duration: assets.video.duration.unwrap_or(0.0),
            owner_id: user.id,
        })
        .await?;

    tracing::info!(video_id = %video.id, "video published");
    Ok(ApiResponse::created(video, "Video published successfully"))
}

/// GET /api/v1/videos/{videoId}
///
/// Fetches one video with its owner's public fields. 400/404 on invalid or
/// unknown identifier.
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<VideoWithOwner>, ApiError> {
    let video_id = validation::parse_id("video", &video_id)?;

    let video = state
        .videos
        .find_with_owner(video_id)
        .await?
        .ok_or(ApiError::NotFound("Video"))?;

    Ok(ApiResponse::ok(video, "Video fetched successfully"))
}

/// PATCH /api/v1/videos/{videoId}
///
/// Partial update: only the supplied fields (title, description, an
/// optional replacement thumbnail) are written; omitted fields are left
/// untouched. A supplied-but-blank text field is rejected. The new
/// thumbnail is uploaded before the store write; the old thumbnail stays on
/// the host.
pub async fn update_video(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<ApiResponse<Video>, ApiError> {
    let video_id = validation::parse_id("video", &video_id)?;
    let form = read_video_form(multipart).await?;

    let mut changes = VideoChanges::default();
    if form.title.is_some() {
        changes.title = Some(validation::require_text("title", form.title.as_deref())?);
    }
    if form.description.is_some() {
        changes.description = Some(validation::require_text(
            "description",
            form.description.as_deref(),
        )?);
    }
    if let Some(thumbnail) = &form.thumbnail {
        let uploaded = orchestrator::upload_thumbnail(state.media.as_ref(), thumbnail).await?;
        changes.thumbnail = Some(uploaded.url);
    }

    if changes.is_empty() {
        return Err(ApiError::missing("title, description or thumbnail"));
    }

    let video = state
        .videos
        .update_owned(video_id, user.id, changes)
        .await?
        .ok_or(ApiError::NotFoundOrUnauthorized("Video"))?;

    Ok(ApiResponse::ok(video, "Video updated successfully"))
}

/// DELETE /api/v1/videos/{videoId}
///
/// Deletes a video outright (no tombstone). 404 if absent, 403 if the
/// acting user is not the owner. The removal itself still carries the owner
/// in its WHERE clause.
pub async fn delete_video(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    let video_id = validation::parse_id("video", &video_id)?;

    let video = state
        .videos
        .find_by_id(video_id)
        .await?
        .ok_or(ApiError::NotFound("Video"))?;
    if video.owner_id != user.id {
        return Err(ApiError::Forbidden("only the owner can delete this video"));
    }

    let deleted = state.videos.delete_owned(video_id, user.id).await?;
    if !deleted {
        // The record vanished between the lookup and the delete.
        return Err(ApiError::NotFound("Video"));
    }

    tracing::info!(%video_id, "video deleted");
    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "Video deleted successfully",
    ))
}

/// PATCH /api/v1/videos/toggle/publish/{videoId}
///
/// Flips the publish flag and reports the new state. 404 if absent, 403 if
/// not owned by the acting user.
///
/// This is a toggle, not a set-to-value operation: replaying it returns the
/// record to its previous state, so a client that retries after a timeout
/// may reverse its own change.
pub async fn toggle_publish_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    let video_id = validation::parse_id("video", &video_id)?;

    let video = state
        .videos
        .find_by_id(video_id)
        .await?
        .ok_or(ApiError::NotFound("Video"))?;
    if video.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "only the owner can change the publish state",
        ));
    }

    let is_published = state
        .videos
        .toggle_publish_owned(video_id, user.id)
        .await?
        .ok_or(ApiError::NotFound("Video"))?;

    let message = if is_published {
        "Video published successfully"
    } else {
        "Video unpublished successfully"
    };

    Ok(ApiResponse::ok(
        serde_json::json!({ "isPublished": is_published }),
        message,
    ))
}
