//! Business logic services for message management.

pub mod message_service;
pub mod mock_repositories;

pub use message_service::{AccountDirectory, MessageRepo, MessageService};
pub use mock_repositories::{MockAccountDirectory, MockMessageRepository};
