/**
 * Upload Orchestrator
 *
 * Sequences the external upload calls a video operation needs before any
 * record is persisted. Uploads run strictly one after another: media file
 * first, then thumbnail.
 *
 * Known limitation: there is no compensating cleanup. If the thumbnail
 * upload fails after the media file succeeded, the media file stays on the
 * external host with no record referencing it.
 */

use crate::error::ApiError;
use crate::uploads::{MediaFile, MediaHost, UploadError, UploadedMedia};

/// References returned for a full video publish.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAssets {
    pub video: UploadedMedia,
    pub thumbnail: UploadedMedia,
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        ApiError::UploadFailed(err.to_string())
    }
}

/// Upload the media file and its thumbnail, in that order.
///
/// Fails with `UploadFailed` if either call does not return a usable
/// reference; a thumbnail failure leaves the already-uploaded media file
/// orphaned on the host.
pub async fn upload_video_assets(
    host: &dyn MediaHost,
    video: &MediaFile,
    thumbnail: &MediaFile,
) -> Result<VideoAssets, ApiError> {
    let video = host.upload(video).await?;
    let thumbnail = host.upload(thumbnail).await?;

    Ok(VideoAssets { video, thumbnail })
}

/// Upload a replacement thumbnail.
pub async fn upload_thumbnail(
    host: &dyn MediaHost,
    thumbnail: &MediaFile,
) -> Result<UploadedMedia, ApiError> {
    Ok(host.upload(thumbnail).await?)
}
