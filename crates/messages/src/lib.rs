//! Message creation, lookup, update, and deletion for the Soapbox backend.
//!
//! [`MessageService`] owns the validation rules; persistence and the author
//! existence check are reached through the [`MessageRepo`] and
//! [`AccountDirectory`] capabilities so the logic can run against SQLite or
//! in-memory stores in tests.

pub mod services;

pub use services::{
    AccountDirectory, MessageRepo, MessageService, MockAccountDirectory, MockMessageRepository,
};
