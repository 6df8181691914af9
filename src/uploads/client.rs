/**
 * HTTP Media Host Client
 *
 * Uploads files to the external media host as a multipart POST and parses
 * the `{url, duration}` response. No retries: a failed call surfaces as an
 * `UploadError` and the caller decides what the request outcome is.
 */

use async_trait::async_trait;
use serde::Deserialize;

use crate::uploads::{MediaFile, MediaHost, UploadError, UploadedMedia};

/// Response body returned by the media host for a successful upload.
#[derive(Debug, Deserialize)]
struct HostResponse {
    #[serde(default)]
    url: String,
    #[serde(default)]
    duration: Option<f64>,
}

/// Media host reached over HTTP.
pub struct HttpMediaHost {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpMediaHost {
    pub fn new(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl MediaHost for HttpMediaHost {
    async fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        tracing::debug!(file = %file.name, "uploading to media host");

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UploadError::Rejected(format!(
                "media host returned {}",
                response.status()
            )));
        }

        let body: HostResponse = response
            .json()
            .await
            .map_err(|_| UploadError::Rejected("malformed media host response".to_string()))?;

        if body.url.is_empty() {
            return Err(UploadError::Rejected(
                "media host response carried no url".to_string(),
            ));
        }

        Ok(UploadedMedia {
            url: body.url,
            duration: body.duration,
        })
    }
}
