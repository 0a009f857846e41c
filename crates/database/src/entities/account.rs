//! Account entity definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account as stored in the `accounts` table.
///
/// The password is held in plain form; the register/login contract returns
/// it verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
}

/// Username/password pair presented at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCredentials {
    pub username: String,
    pub password: String,
}
