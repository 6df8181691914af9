/**
 * Authentication Middleware
 *
 * This middleware protects the API routes. It extracts and verifies the JWT
 * bearer token from the Authorization header, checks that the user still
 * exists, and attaches the acting user to the request extensions for
 * handlers to consume.
 */

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::sessions::verify_token;
use crate::server::state::AppState;

/// The acting principal, resolved from the session token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

/// Authentication middleware
///
/// 1. Extracts the JWT token from the Authorization header
/// 2. Verifies the token
/// 3. Confirms the user still exists
/// 4. Attaches `CurrentUser` to request extensions
///
/// Returns 401 Unauthorized if the token is missing or invalid.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    // Format: "Bearer <token>"
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::error!("Invalid user ID in token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    // The token may outlive the account.
    let exists = app_state
        .users
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .is_some();
    if !exists {
        tracing::warn!("Token for unknown user {user_id}");
        return Err(StatusCode::UNAUTHORIZED);
    }

    request.extensions_mut().insert(CurrentUser {
        id: user_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the acting user.
///
/// Usable as a handler parameter on any route behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub CurrentUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("CurrentUser not found in request extensions");
                StatusCode::UNAUTHORIZED
            })?;

        Ok(AuthUser(user))
    }
}
