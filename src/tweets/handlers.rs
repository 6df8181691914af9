/**
 * Tweet Handlers
 *
 * CRUD endpoints for tweets. Every identifier and free-text input is
 * validated before any store access. Update and delete go through the
 * store's combined id+owner lookup; a miss is reported as "not found or
 * unauthorized" without disclosing which condition failed.
 */

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::server::state::AppState;
use crate::tweets::model::Tweet;
use crate::validation;

/// Request body for tweet create and update.
#[derive(Debug, Deserialize)]
pub struct TweetBody {
    pub content: Option<String>,
}

/// POST /api/v1/tweets
///
/// Creates a tweet for the acting user. 400 if content is blank.
pub async fn create_tweet(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<TweetBody>,
) -> Result<ApiResponse<Tweet>, ApiError> {
    let content = validation::require_text("content", body.content.as_deref())?;

    let tweet = state.tweets.create(user.id, content).await?;

    tracing::info!(tweet_id = %tweet.id, "tweet created");
    Ok(ApiResponse::created(tweet, "Tweet created successfully"))
}

/// GET /api/v1/tweets/user/{userId}
///
/// All tweets by one user, newest first. 400 if the identifier is invalid.
pub async fn get_user_tweets(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<Tweet>>, ApiError> {
    let user_id = validation::parse_id("user", &user_id)?;

    let tweets = state.tweets.list_by_owner(user_id).await?;

    Ok(ApiResponse::ok(tweets, "User tweets fetched successfully"))
}

/// PATCH /api/v1/tweets/{tweetId}
///
/// Replaces the content of a tweet the acting user owns. 404 if the tweet
/// is absent or owned by someone else.
pub async fn update_tweet(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(tweet_id): Path<String>,
    Json(body): Json<TweetBody>,
) -> Result<ApiResponse<Tweet>, ApiError> {
    let tweet_id = validation::parse_id("tweet", &tweet_id)?;
    let content = validation::require_text("content", body.content.as_deref())?;

    let tweet = state
        .tweets
        .update_owned(tweet_id, user.id, content)
        .await?
        .ok_or(ApiError::NotFoundOrUnauthorized("Tweet"))?;

    Ok(ApiResponse::ok(tweet, "Tweet updated successfully"))
}

/// DELETE /api/v1/tweets/{tweetId}
///
/// Deletes a tweet the acting user owns. 404 if the tweet is absent or
/// owned by someone else.
pub async fn delete_tweet(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(tweet_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    let tweet_id = validation::parse_id("tweet", &tweet_id)?;

    let deleted = state.tweets.delete_owned(tweet_id, user.id).await?;
    if !deleted {
        return Err(ApiError::NotFoundOrUnauthorized("Tweet"));
    }

    tracing::info!(%tweet_id, "tweet deleted");
    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "Tweet deleted successfully",
    ))
}
