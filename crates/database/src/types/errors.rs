//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Account-specific errors.
///
/// Invalid details and the username conflict are distinct so the boundary can
/// map them to 400 and 409 respectively; the display strings are the response
/// bodies.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid account details.")]
    InvalidAccountDetails,

    #[error("Username already exists.")]
    UsernameAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Message-specific errors.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Message text length invalid")]
    InvalidMessageText,

    #[error("Account does not exist")]
    UnknownAuthor,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
