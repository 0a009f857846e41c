//! Account REST endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::state::GatewayState;
use soapbox_database::{Account, AccountCredentials, CreateAccountRequest};

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    /// Stored and returned in plain form; no hashing is applied.
    pub password: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            password: account.password,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Create account routes
pub fn create_account_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/register", axum::routing::post(register))
        .route("/login", axum::routing::post(login))
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account registered", body = AccountResponse),
        (status = 400, description = "Empty username or password shorter than 4 characters"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<RegisterRequest>,
) -> GatewayResult<Json<AccountResponse>> {
    let account = state
        .account_service()
        .register_account(CreateAccountRequest {
            username: payload.username,
            password: payload.password,
        })
        .await?;

    Ok(Json(account.into()))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AccountResponse),
        (status = 401, description = "Unknown username or wrong password")
    )
)]
pub async fn login(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<LoginRequest>,
) -> GatewayResult<impl IntoResponse> {
    let account = state
        .account_service()
        .login_to_account(AccountCredentials {
            username: payload.username,
            password: payload.password,
        })
        .await?;

    // Failed login is an expected outcome: 401 with an empty body, never an
    // error from the service.
    Ok(match account {
        Some(account) => Json(AccountResponse::from(account)).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    })
}
