//! Delegated media storage.
//!
//! Files never land on local disk: multipart fields are forwarded to an
//! external media host which returns a public URL (and, for video media, a
//! derived duration).

pub mod client;
pub mod orchestrator;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// A file received from the request, ready for upload.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub name: String,
    pub bytes: Bytes,
}

/// Result of a single successful upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedMedia {
    pub url: String,
    /// Media duration in seconds, when the host can derive one.
    pub duration: Option<f64>,
}

/// Errors from the media host.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The host answered but did not return a usable reference.
    #[error("media host rejected upload: {0}")]
    Rejected(String),

    /// The request never completed.
    #[error("media host unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// External media storage.
#[async_trait]
pub trait MediaHost: Send + Sync + 'static {
    /// Upload one file, returning its public reference.
    async fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError>;
}
