//! API error taxonomy and HTTP conversion.

pub mod conversion;
pub mod types;

pub use types::ApiError;
