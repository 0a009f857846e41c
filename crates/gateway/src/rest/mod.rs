//! REST API endpoints for the gateway

pub mod account;
pub mod health;
pub mod message;

use crate::state::GatewayState;
use axum::Router;
use std::sync::Arc;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/health", axum::routing::get(health::health_check))
        // Account routes
        .merge(account::create_account_routes())
        // Message routes
        .merge(message::create_message_routes())
}
