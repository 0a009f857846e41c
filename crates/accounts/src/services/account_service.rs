//! Account service for registration and login.

use soapbox_database::{
    Account, AccountCredentials, AccountError, AccountRepository, AccountResult,
    CreateAccountRequest,
};
use sqlx::SqlitePool;
use tracing::info;

use super::mock_repositories::MockAccountRepository;

/// Service for account registration and login
pub struct AccountService<R> {
    account_repository: R,
}

impl AccountService<AccountRepository> {
    /// Create a new account service backed by the SQLite repository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            account_repository: AccountRepository::new(pool),
        }
    }
}

impl AccountService<MockAccountRepository> {
    /// Create a new account service over an in-memory store for testing
    pub fn new_for_testing() -> Self {
        Self {
            account_repository: MockAccountRepository::new(),
        }
    }
}

impl<R> AccountService<R>
where
    R: AccountRepo,
{
    /// Register a new account.
    ///
    /// Format validation runs before the uniqueness check: malformed input is
    /// reported as invalid details even when the username is also taken. The
    /// store's UNIQUE constraint remains authoritative for races past the
    /// pre-check.
    pub async fn register_account(&self, request: CreateAccountRequest) -> AccountResult<Account> {
        if request.username.is_empty() || request.password.chars().count() < 4 {
            return Err(AccountError::InvalidAccountDetails);
        }

        if self
            .account_repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AccountError::UsernameAlreadyExists);
        }

        let account = self.account_repository.create(&request).await?;

        info!(
            account_id = account.id,
            username = %account.username,
            "registered account"
        );

        Ok(account)
    }

    /// Verify credentials against the stored account.
    ///
    /// Unknown username and wrong password both yield `Ok(None)`. A failed
    /// login is an expected outcome, never an error. The match is exact and
    /// case-sensitive; no hashing is applied.
    pub async fn login_to_account(
        &self,
        credentials: AccountCredentials,
    ) -> AccountResult<Option<Account>> {
        let existing = self
            .account_repository
            .find_by_username(&credentials.username)
            .await?;

        Ok(existing.filter(|account| account.password == credentials.password))
    }
}

/// Trait for account repositories to allow generic usage
pub trait AccountRepo {
    async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>>;
    async fn create(&self, request: &CreateAccountRequest) -> AccountResult<Account>;
}

impl AccountRepo for AccountRepository {
    async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        self.find_by_username(username).await
    }

    async fn create(&self, request: &CreateAccountRequest) -> AccountResult<Account> {
        self.create(request).await
    }
}

impl AccountRepo for MockAccountRepository {
    async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        self.find_by_username(username).await
    }

    async fn create(&self, request: &CreateAccountRequest) -> AccountResult<Account> {
        self.create(request).await
    }
}
