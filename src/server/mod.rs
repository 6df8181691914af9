//! Server state and initialization.

pub mod init;
pub mod state;
