//! Database initialization for the durable storage backend

pub mod init;
pub mod models;

pub use init::*;
pub use models::*;
