//! Video records: listing, publishing, ownership-gated mutation.

pub mod handlers;
pub mod model;
pub mod query;
pub mod store;
