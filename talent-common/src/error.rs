//! Common error types for the candidate tracker

use thiserror::Error;

/// Common result type for talent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the stores and the HTTP layer
#[derive(Error, Debug)]
pub enum Error {
    /// Username/password pair did not match a stored account
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,

    /// Non-admin session on an admin-only operation
    #[error("Admin access required")]
    Forbidden,

    /// Bad record index, record id, or user id
    #[error("{0}")]
    NotFound(String),

    /// Account creation with a username already taken
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// An account tried to delete itself
    #[error("Cannot delete your own account")]
    SelfDeletion,

    /// Deleting the target would leave no admin account
    #[error("Cannot delete the last admin user")]
    LastAdminProtected,

    /// Group-by column absent from the record schema
    #[error("Column {0} not found")]
    ColumnNotFound(String),

    /// Analytics requested over an empty record set
    #[error("No data available")]
    MissingData,

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet could not be opened or parsed
    #[error("Spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::XlsxError),

    /// Spreadsheet could not be serialised
    #[error("Spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
