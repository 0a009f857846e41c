//! Message REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::state::GatewayState;
use soapbox_database::Message;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            posted_by: message.posted_by,
            message_text: message.message_text,
            time_posted_epoch: message.time_posted_epoch,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    pub message_text: String,
}

/// Create message routes
pub fn create_message_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route(
            "/messages",
            axum::routing::get(list_messages).post(create_message),
        )
        .route(
            "/messages/:message_id",
            axum::routing::get(get_message)
                .patch(update_message)
                .delete(delete_message),
        )
        .route(
            "/accounts/:account_id/messages",
            axum::routing::get(list_account_messages),
        )
}

#[utoipa::path(
    post,
    path = "/messages",
    tag = "Messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 200, description = "Message created", body = MessageResponse),
        (status = 400, description = "Text out of range or unknown author")
    )
)]
pub async fn create_message(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateMessageRequest>,
) -> GatewayResult<Json<MessageResponse>> {
    let message = state
        .message_service()
        .create_message(soapbox_database::CreateMessageRequest {
            posted_by: payload.posted_by,
            message_text: payload.message_text,
            time_posted_epoch: payload.time_posted_epoch,
        })
        .await?;

    Ok(Json(message.into()))
}

#[utoipa::path(
    get,
    path = "/messages",
    tag = "Messages",
    responses(
        (status = 200, description = "All messages, store-native order", body = Vec<MessageResponse>)
    )
)]
pub async fn list_messages(
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<MessageResponse>>> {
    let messages = state.message_service().get_all_messages().await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/messages/{message_id}",
    tag = "Messages",
    params(("message_id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "The message, or an empty body when absent", body = MessageResponse)
    )
)]
pub async fn get_message(
    Path(message_id): Path<i64>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<impl IntoResponse> {
    let message = state.message_service().get_message_by_id(message_id).await?;

    // Absence is a normal outcome: 200 with an empty body.
    Ok(match message {
        Some(message) => Json(MessageResponse::from(message)).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

#[utoipa::path(
    patch,
    path = "/messages/{message_id}",
    tag = "Messages",
    params(("message_id" = i64, Path, description = "Message ID")),
    request_body = UpdateMessageRequest,
    responses(
        (status = 200, description = "Rows updated (1)", body = u64),
        (status = 400, description = "Unknown message or text out of range")
    )
)]
pub async fn update_message(
    Path(message_id): Path<i64>,
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<UpdateMessageRequest>,
) -> GatewayResult<impl IntoResponse> {
    let updated = state
        .message_service()
        .update_message_by_id(message_id, &payload.message_text)
        .await?;

    // Not-found and rejected text are not distinguished: both report 0 and
    // surface as a bare 400.
    Ok(if updated == 0 {
        StatusCode::BAD_REQUEST.into_response()
    } else {
        Json(updated).into_response()
    })
}

#[utoipa::path(
    delete,
    path = "/messages/{message_id}",
    tag = "Messages",
    params(("message_id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Rows deleted (1), or an empty body when nothing matched", body = u64)
    )
)]
pub async fn delete_message(
    Path(message_id): Path<i64>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<impl IntoResponse> {
    let deleted = state
        .message_service()
        .delete_message_by_id(message_id)
        .await?;

    // Delete-if-present: missing targets are not errors.
    Ok(if deleted == 0 {
        StatusCode::OK.into_response()
    } else {
        Json(deleted).into_response()
    })
}

#[utoipa::path(
    get,
    path = "/accounts/{account_id}/messages",
    tag = "Messages",
    params(("account_id" = i64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Messages posted by the account", body = Vec<MessageResponse>)
    )
)]
pub async fn list_account_messages(
    Path(account_id): Path<i64>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<MessageResponse>>> {
    let messages = state
        .message_service()
        .get_all_messages_by_account(account_id)
        .await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
