//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use soapbox_database::{AccountError, MessageError};
use thiserror::Error;

/// Gateway error types.
///
/// The display string doubles as the response body, so the domain failure
/// messages pass through unchanged.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let GatewayError::DatabaseError(ref message) = self {
            tracing::error!(error = %message, "database error");
        }

        (self.status_code(), self.to_string()).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<AccountError> for GatewayError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::InvalidAccountDetails => GatewayError::InvalidRequest(error.to_string()),
            AccountError::UsernameAlreadyExists => GatewayError::Conflict(error.to_string()),
            AccountError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<MessageError> for GatewayError {
    fn from(error: MessageError) -> Self {
        match error {
            MessageError::InvalidMessageText | MessageError::UnknownAuthor => {
                GatewayError::InvalidRequest(error.to_string())
            }
            MessageError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(error: sqlx::Error) -> Self {
        GatewayError::DatabaseError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_errors_map_to_expected_statuses() {
        let invalid = GatewayError::from(AccountError::InvalidAccountDetails);
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.to_string(), "Invalid account details.");

        let conflict = GatewayError::from(AccountError::UsernameAlreadyExists);
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(conflict.to_string(), "Username already exists.");
    }

    #[test]
    fn message_errors_map_to_bad_request() {
        let invalid = GatewayError::from(MessageError::InvalidMessageText);
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let unknown = GatewayError::from(MessageError::UnknownAuthor);
        assert_eq!(unknown.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown.to_string(), "Account does not exist");
    }

    #[test]
    fn database_errors_map_to_internal_server_error() {
        let error = GatewayError::from(MessageError::DatabaseError("disk I/O error".into()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
