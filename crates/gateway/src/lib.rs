//! # Soapbox Gateway Crate
//!
//! This crate provides the HTTP layer for Soapbox, routing REST requests to
//! the account and message services.
//!
//! ## Architecture
//!
//! - **REST**: HTTP API endpoints with OpenAPI documentation
//! - **State**: Shared application state holding the domain services
//! - **Error**: Translation from domain failures to HTTP status codes
//! - **Middleware**: Request logging and CORS

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export main types for convenience
pub use error::{GatewayError, GatewayResult};
pub use state::GatewayState;

use axum::{http::header::CONTENT_TYPE, http::Method, middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);
    #[cfg_attr(not(debug_assertions), allow(unused_mut))]
    let mut router = Router::new()
        .merge(rest::create_rest_routes().with_state(arc_state))
        .layer(cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    // Add Swagger UI if in debug mode
    #[cfg(debug_assertions)]
    {
        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::health::health_check,
                rest::account::register,
                rest::account::login,
                rest::message::create_message,
                rest::message::list_messages,
                rest::message::get_message,
                rest::message::update_message,
                rest::message::delete_message,
                rest::message::list_account_messages,
            ),
            components(
                schemas(
                    rest::health::HealthResponse,
                    rest::account::RegisterRequest,
                    rest::account::LoginRequest,
                    rest::account::AccountResponse,
                    rest::message::CreateMessageRequest,
                    rest::message::UpdateMessageRequest,
                    rest::message::MessageResponse,
                )
            ),
            tags(
                (name = "Accounts", description = "Account registration and login"),
                (name = "Messages", description = "Message management"),
                (name = "Health", description = "Service health"),
            )
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
}
