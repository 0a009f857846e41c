//! Account repository for database operations.

use crate::entities::{Account, CreateAccountRequest};
use crate::types::{AccountError, AccountResult};
use sqlx::SqlitePool;
use tracing::info;

/// Repository for account database operations
#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find account by ID
    pub async fn find_by_id(&self, id: i64) -> AccountResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT id, username, password FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }

    /// Find account by username
    pub async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT id, username, password FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }

    /// Check if an account with the given ID exists
    pub async fn exists(&self, id: i64) -> AccountResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    /// Create a new account.
    ///
    /// The UNIQUE constraint on `accounts.username` is authoritative for
    /// duplicate detection; a constraint violation is translated to
    /// [`AccountError::UsernameAlreadyExists`] so concurrent registrations of
    /// the same username cannot both succeed.
    pub async fn create(&self, request: &CreateAccountRequest) -> AccountResult<Account> {
        let result = sqlx::query("INSERT INTO accounts (username, password) VALUES (?, ?)")
            .bind(&request.username)
            .bind(&request.password)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint failed") {
                    AccountError::UsernameAlreadyExists
                } else {
                    AccountError::DatabaseError(e.to_string())
                }
            })?;

        let account_id = result.last_insert_rowid();

        info!(
            account_id = account_id,
            username = %request.username,
            "created new account"
        );

        Ok(Account {
            id: account_id,
            username: request.username.clone(),
            password: request.password.clone(),
        })
    }
}
