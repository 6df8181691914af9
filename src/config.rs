/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables. The database and media
 * host endpoints are required; the port falls back to a development default.
 */

use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Runtime configuration for the server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP server binds to (`SERVER_PORT`, default 3000).
    pub port: u16,
    /// PostgreSQL connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Endpoint of the external media upload host (`MEDIA_UPLOAD_URL`).
    pub media_upload_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `DATABASE_URL` or `MEDIA_UPLOAD_URL` is not
    /// set, or if `SERVER_PORT` is set to a non-numeric value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar("SERVER_PORT", raw))?,
            Err(_) => 3000,
        };

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let media_upload_url = std::env::var("MEDIA_UPLOAD_URL")
            .map_err(|_| ConfigError::MissingVar("MEDIA_UPLOAD_URL"))?;

        Ok(Self {
            port,
            database_url,
            media_upload_url,
        })
    }
}
