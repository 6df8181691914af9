//! vidshare — video/social sharing backend.
//!
//! CRUD endpoints for tweets and videos over PostgreSQL, with media files
//! delegated to an external upload host. Handlers validate input, perform a
//! single store operation and wrap the result in the uniform API envelope.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod tweets;
pub mod uploads;
pub mod users;
pub mod validation;
pub mod videos;
