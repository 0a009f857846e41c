//! Entity definitions shared by the repositories and domain services.

pub mod account;
pub mod message;

pub use account::{Account, AccountCredentials, CreateAccountRequest};
pub use message::{CreateMessageRequest, Message};
