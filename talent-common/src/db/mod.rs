//! Credential store: SQLite users table

pub mod init;
pub mod users;

pub use init::*;
pub use users::*;
