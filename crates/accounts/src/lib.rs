//! Account registration and authentication for the Soapbox backend.
//!
//! The service layer here owns the validation rules; persistence is reached
//! through the [`AccountRepo`] capability so the logic can run against the
//! real SQLite repository or an in-memory one in tests.

pub mod services;

pub use services::{AccountRepo, AccountService, MockAccountRepository};
