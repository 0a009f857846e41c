//! Shared result aliases and error types.

pub mod errors;

pub use errors::{AccountError, DatabaseError, MessageError};

pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type AccountResult<T> = Result<T, AccountError>;
pub type MessageResult<T> = Result<T, MessageError>;
