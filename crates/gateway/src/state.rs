//! Shared application state for the gateway

use std::sync::Arc;

use soapbox_accounts::AccountService;
use soapbox_config::DatabaseConfig;
use soapbox_database::{AccountRepository, MessageRepository};
use soapbox_messages::MessageService;
use sqlx::SqlitePool;

use crate::error::{GatewayError, GatewayResult};

/// Shared application state containing the domain services
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// Account service
    pub account_service: Arc<AccountService<AccountRepository>>,
    /// Message service
    pub message_service: Arc<MessageService<MessageRepository, AccountRepository>>,
}

impl GatewayState {
    /// Create a new gateway state with all services initialized
    pub fn new(pool: SqlitePool) -> Self {
        let account_service = Arc::new(AccountService::new(pool.clone()));
        let message_service = Arc::new(MessageService::new(pool.clone()));

        Self {
            pool,
            account_service,
            message_service,
        }
    }

    /// Create gateway state from database configuration
    pub async fn from_config(config: &DatabaseConfig) -> GatewayResult<Self> {
        let pool = soapbox_database::initialize_database(config)
            .await
            .map_err(|e| {
                GatewayError::DatabaseError(format!("Failed to initialize database: {}", e))
            })?;

        Ok(Self::new(pool))
    }

    /// Get an account service reference
    pub fn account_service(&self) -> &AccountService<AccountRepository> {
        &self.account_service
    }

    /// Get a message service reference
    pub fn message_service(&self) -> &MessageService<MessageRepository, AccountRepository> {
        &self.message_service
    }
}
