//! Tweet records: owner-scoped CRUD.

pub mod handlers;
pub mod model;
pub mod store;
