//! Route configuration.

pub mod router;
