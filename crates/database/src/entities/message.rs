//! Message entity definitions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A text post as stored in the `messages` table.
///
/// JSON uses the camelCase attribute names of the public contract
/// (`postedBy`, `messageText`, `timePostedEpoch`); columns stay snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    /// Caller-supplied posting time, echoed verbatim. Never server-generated.
    pub time_posted_epoch: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}
