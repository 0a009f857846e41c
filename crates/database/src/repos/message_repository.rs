//! Repository for message data access operations.

use crate::entities::{CreateMessageRequest, Message};
use crate::types::{MessageError, MessageResult};
use sqlx::SqlitePool;
use tracing::info;

/// Repository for message database operations
#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a message by its ID
    pub async fn find_by_id(&self, id: i64) -> MessageResult<Option<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT id, posted_by, message_text, time_posted_epoch FROM messages WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MessageError::DatabaseError(e.to_string()))
    }

    /// Fetch every message in store-native order
    pub async fn find_all(&self) -> MessageResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT id, posted_by, message_text, time_posted_epoch FROM messages",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MessageError::DatabaseError(e.to_string()))
    }

    /// Fetch all messages authored by the given account
    pub async fn find_by_posted_by(&self, account_id: i64) -> MessageResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT id, posted_by, message_text, time_posted_epoch FROM messages WHERE posted_by = ?",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MessageError::DatabaseError(e.to_string()))
    }

    /// Create a new message
    pub async fn create(&self, request: &CreateMessageRequest) -> MessageResult<Message> {
        let result = sqlx::query(
            "INSERT INTO messages (posted_by, message_text, time_posted_epoch) VALUES (?, ?, ?)",
        )
        .bind(request.posted_by)
        .bind(&request.message_text)
        .bind(request.time_posted_epoch)
        .execute(&self.pool)
        .await
        .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        let message_id = result.last_insert_rowid();

        info!(
            message_id = message_id,
            posted_by = request.posted_by,
            "created new message"
        );

        Ok(Message {
            id: message_id,
            posted_by: request.posted_by,
            message_text: request.message_text.clone(),
            time_posted_epoch: request.time_posted_epoch,
        })
    }

    /// Replace the text of a message in place.
    ///
    /// Returns the number of rows updated (0 when the id is unknown); poster
    /// and timestamp are untouched.
    pub async fn update_text(&self, id: i64, message_text: &str) -> MessageResult<u64> {
        let result = sqlx::query("UPDATE messages SET message_text = ? WHERE id = ?")
            .bind(message_text)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Delete a message by ID, returning the number of rows removed (0 or 1)
    pub async fn delete_by_id(&self, id: i64) -> MessageResult<u64> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            info!(message_id = id, "deleted message");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqliteConnectOptions;
    use sqlx::SqlitePool;
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_messages.db");

        let connect_options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(connect_options).await.unwrap();

        // Create test schema
        sqlx::query(
            "CREATE TABLE messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                posted_by INTEGER NOT NULL,
                message_text TEXT NOT NULL,
                time_posted_epoch INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        (pool, temp_dir)
    }

    fn request(posted_by: i64, text: &str, epoch: i64) -> CreateMessageRequest {
        CreateMessageRequest {
            posted_by,
            message_text: text.to_string(),
            time_posted_epoch: epoch,
        }
    }

    #[tokio::test]
    async fn test_create_message_echoes_fields() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = MessageRepository::new(pool);

        let message = repo.create(&request(1, "hello", 1000)).await.unwrap();
        assert!(message.id > 0);
        assert_eq!(message.posted_by, 1);
        assert_eq!(message.message_text, "hello");
        assert_eq!(message.time_posted_epoch, 1000);

        let found = repo.find_by_id(message.id).await.unwrap();
        assert_eq!(found, Some(message));
    }

    #[tokio::test]
    async fn test_find_all_returns_every_message() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = MessageRepository::new(pool);

        repo.create(&request(1, "first", 1000)).await.unwrap();
        repo.create(&request(2, "second", 2000)).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_posted_by_filters_author() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = MessageRepository::new(pool);

        repo.create(&request(1, "mine", 1000)).await.unwrap();
        repo.create(&request(2, "theirs", 2000)).await.unwrap();
        repo.create(&request(1, "also mine", 3000)).await.unwrap();

        let mine = repo.find_by_posted_by(1).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|m| m.posted_by == 1));

        let nobody = repo.find_by_posted_by(99).await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn test_update_text_touches_only_the_text_column() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = MessageRepository::new(pool);

        let created = repo.create(&request(1, "before", 1000)).await.unwrap();

        let updated = repo.update_text(created.id, "after").await.unwrap();
        assert_eq!(updated, 1);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.message_text, "after");
        assert_eq!(found.posted_by, created.posted_by);
        assert_eq!(found.time_posted_epoch, created.time_posted_epoch);
    }

    #[tokio::test]
    async fn test_update_text_missing_message_returns_zero() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = MessageRepository::new(pool);

        assert_eq!(repo.update_text(42, "ghost").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_by_id_counts_removed_rows() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = MessageRepository::new(pool);

        let created = repo.create(&request(1, "to delete", 1000)).await.unwrap();

        assert_eq!(repo.delete_by_id(created.id).await.unwrap(), 1);
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
        assert_eq!(repo.delete_by_id(created.id).await.unwrap(), 0);
    }
}
