//! Business logic services for account management.

pub mod account_service;
pub mod mock_repositories;

pub use account_service::{AccountRepo, AccountService};
pub use mock_repositories::MockAccountRepository;
