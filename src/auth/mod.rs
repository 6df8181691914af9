//! Session tokens for authenticated users.

pub mod sessions;
