/**
 * Server Initialization
 *
 * Connects the database, runs migrations, wires the PostgreSQL stores and
 * the HTTP media host into `AppState`, and builds the router.
 */

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::routes::router::create_router;
use crate::server::state::AppState;
use crate::tweets::store::PgTweetStore;
use crate::uploads::client::HttpMediaHost;
use crate::users::PgUserStore;
use crate::videos::store::PgVideoStore;

/// Create and configure the Axum application.
///
/// # Errors
///
/// Fails if the database is unreachable or migrations cannot be applied.
/// Unlike a missing optional service, a broken store is fatal: every
/// endpoint needs it.
pub async fn create_app(config: ServerConfig) -> Result<Router, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {e}");
        sqlx::Error::Migrate(Box::new(e))
    })?;

    let app_state = AppState {
        videos: Arc::new(PgVideoStore::new(pool.clone())),
        tweets: Arc::new(PgTweetStore::new(pool.clone())),
        users: Arc::new(PgUserStore::new(pool)),
        media: Arc::new(HttpMediaHost::new(config.media_upload_url)),
    };

    tracing::info!("Stores and media host initialized");

    Ok(create_router(app_state))
}
