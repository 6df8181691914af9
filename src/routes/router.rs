/**
 * Router Configuration
 *
 * Builds the Axum router. All /api/v1 routes sit behind the JWT auth
 * middleware, which resolves the acting user for the handlers.
 *
 * # Routes
 *
 * ## Tweets
 * - `POST   /api/v1/tweets` - Create tweet
 * - `GET    /api/v1/tweets/user/{userId}` - List a user's tweets
 * - `PATCH  /api/v1/tweets/{tweetId}` - Update tweet
 * - `DELETE /api/v1/tweets/{tweetId}` - Delete tweet
 *
 * ## Videos
 * - `GET    /api/v1/videos` - List published videos
 * - `POST   /api/v1/videos` - Publish a video (multipart)
 * - `GET    /api/v1/videos/{videoId}` - Fetch one video
 * - `PATCH  /api/v1/videos/{videoId}` - Partial update (multipart)
 * - `DELETE /api/v1/videos/{videoId}` - Delete video
 * - `PATCH  /api/v1/videos/toggle/publish/{videoId}` - Flip publish state
 */

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::server::state::AppState;
use crate::tweets::handlers::{create_tweet, delete_tweet, get_user_tweets, update_tweet};
use crate::videos::handlers::{
    delete_video, get_video, list_videos, publish_video, toggle_publish_status, update_video,
};

/// Create the Axum router with all routes configured.
pub fn create_router(app_state: AppState) -> Router<()> {
    let api = Router::new()
        .route("/tweets", post(create_tweet))
        .route("/tweets/user/{userId}", get(get_user_tweets))
        .route(
            "/tweets/{tweetId}",
            patch(update_tweet).delete(delete_tweet),
        )
        .route("/videos", get(list_videos).post(publish_video))
        .route(
            "/videos/{videoId}",
            get(get_video).patch(update_video).delete(delete_video),
        )
        .route(
            "/videos/toggle/publish/{videoId}",
            patch(toggle_publish_status),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/v1", api)
        .route("/healthz", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
