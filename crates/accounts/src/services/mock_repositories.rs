//! Mock repository implementations for testing core service functionality

use soapbox_database::{Account, AccountError, AccountResult, CreateAccountRequest};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory account repository for testing
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<i64, Account>>>,
    next_id: Arc<RwLock<i64>>,
    username_index: Arc<RwLock<HashMap<String, i64>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
            username_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    pub async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        let username_index = self.username_index.read().await;
        if let Some(account_id) = username_index.get(username) {
            let accounts = self.accounts.read().await;
            Ok(accounts.get(account_id).cloned())
        } else {
            Ok(None)
        }
    }

    pub async fn create(&self, request: &CreateAccountRequest) -> AccountResult<Account> {
        // Mirror the UNIQUE constraint of the real store
        let mut username_index = self.username_index.write().await;
        if username_index.contains_key(&request.username) {
            return Err(AccountError::UsernameAlreadyExists);
        }

        let mut next_id = self.next_id.write().await;
        let account_id = *next_id;
        *next_id += 1;

        let account = Account {
            id: account_id,
            username: request.username.clone(),
            password: request.password.clone(),
        };

        let mut accounts = self.accounts.write().await;
        accounts.insert(account_id, account.clone());
        username_index.insert(request.username.clone(), account_id);

        Ok(account)
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}
