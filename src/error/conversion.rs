/**
 * Error Conversion
 *
 * Implements `IntoResponse` for `ApiError`, converting every handler error
 * into the uniform error envelope:
 *
 * ```json
 * {
 *   "statusCode": 404,
 *   "message": "Video not found",
 *   "success": false
 * }
 * ```
 *
 * Infrastructure errors (database, upload transport) are logged here with
 * their full detail; only a generic message reaches the client.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self:?}");
        } else {
            tracing::debug!("request rejected: {self}");
        }

        let body = serde_json::json!({
            "statusCode": status.as_u16(),
            "message": self.public_message(),
            "success": false,
        });

        (status, Json(body)).into_response()
    }
}
