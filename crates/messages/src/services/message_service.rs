//! Message service for validation and CRUD operations.

use soapbox_database::{
    AccountRepository, CreateMessageRequest, Message, MessageError, MessageRepository,
    MessageResult,
};
use sqlx::SqlitePool;

use super::mock_repositories::{MockAccountDirectory, MockMessageRepository};

const MAX_MESSAGE_LENGTH: usize = 255;

/// Service for message operations
pub struct MessageService<M, A> {
    message_repository: M,
    account_directory: A,
}

impl MessageService<MessageRepository, AccountRepository> {
    /// Create a new message service backed by the SQLite repositories
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            message_repository: MessageRepository::new(pool.clone()),
            account_directory: AccountRepository::new(pool),
        }
    }
}

impl MessageService<MockMessageRepository, MockAccountDirectory> {
    /// Create a new message service over in-memory stores for testing
    pub fn new_for_testing() -> (Self, MockAccountDirectory) {
        let directory = MockAccountDirectory::new();
        let service = Self {
            message_repository: MockMessageRepository::new(),
            account_directory: directory.clone(),
        };
        (service, directory)
    }
}

impl<M, A> MessageService<M, A>
where
    M: MessageRepo,
    A: AccountDirectory,
{
    /// Create a new message.
    ///
    /// Text must be 1..=255 characters and the author must exist at creation
    /// time. Poster id and timestamp are echoed verbatim.
    pub async fn create_message(&self, request: CreateMessageRequest) -> MessageResult<Message> {
        if !text_length_valid(&request.message_text) {
            return Err(MessageError::InvalidMessageText);
        }

        if !self
            .account_directory
            .author_exists(request.posted_by)
            .await?
        {
            return Err(MessageError::UnknownAuthor);
        }

        self.message_repository.create(&request).await
    }

    /// Get every message in store-native order
    pub async fn get_all_messages(&self) -> MessageResult<Vec<Message>> {
        self.message_repository.find_all().await
    }

    /// Get a message by ID; absence is an expected outcome, not an error
    pub async fn get_message_by_id(&self, id: i64) -> MessageResult<Option<Message>> {
        self.message_repository.find_by_id(id).await
    }

    /// Delete a message by ID, reporting the number of rows removed (0 or 1).
    /// Deleting a missing message reports 0.
    pub async fn delete_message_by_id(&self, id: i64) -> MessageResult<u64> {
        self.message_repository.delete_by_id(id).await
    }

    /// Replace the text of a message, reporting the number of rows updated
    /// (0 or 1).
    ///
    /// Unlike create, a rejected text here is signalled by a 0 count, not a
    /// typed failure; missing messages report 0 the same way. Poster id and
    /// timestamp are untouched.
    pub async fn update_message_by_id(&self, id: i64, new_text: &str) -> MessageResult<u64> {
        if !text_length_valid(new_text) {
            return Ok(0);
        }

        self.message_repository.update_text(id, new_text).await
    }

    /// Get all messages posted by the given account, empty when none
    pub async fn get_all_messages_by_account(&self, account_id: i64) -> MessageResult<Vec<Message>> {
        self.message_repository.find_by_posted_by(account_id).await
    }
}

fn text_length_valid(text: &str) -> bool {
    let length = text.chars().count();
    length >= 1 && length <= MAX_MESSAGE_LENGTH
}

/// Trait for message repositories to allow generic usage
pub trait MessageRepo {
    async fn find_by_id(&self, id: i64) -> MessageResult<Option<Message>>;
    async fn find_all(&self) -> MessageResult<Vec<Message>>;
    async fn find_by_posted_by(&self, account_id: i64) -> MessageResult<Vec<Message>>;
    async fn create(&self, request: &CreateMessageRequest) -> MessageResult<Message>;
    async fn update_text(&self, id: i64, message_text: &str) -> MessageResult<u64>;
    async fn delete_by_id(&self, id: i64) -> MessageResult<u64>;
}

impl MessageRepo for MessageRepository {
    async fn find_by_id(&self, id: i64) -> MessageResult<Option<Message>> {
        self.find_by_id(id).await
    }

    async fn find_all(&self) -> MessageResult<Vec<Message>> {
        self.find_all().await
    }

    async fn find_by_posted_by(&self, account_id: i64) -> MessageResult<Vec<Message>> {
        self.find_by_posted_by(account_id).await
    }

    async fn create(&self, request: &CreateMessageRequest) -> MessageResult<Message> {
        self.create(request).await
    }

    async fn update_text(&self, id: i64, message_text: &str) -> MessageResult<u64> {
        self.update_text(id, message_text).await
    }

    async fn delete_by_id(&self, id: i64) -> MessageResult<u64> {
        self.delete_by_id(id).await
    }
}

impl MessageRepo for MockMessageRepository {
    async fn find_by_id(&self, id: i64) -> MessageResult<Option<Message>> {
        self.find_by_id(id).await
    }

    async fn find_all(&self) -> MessageResult<Vec<Message>> {
        self.find_all().await
    }

    async fn find_by_posted_by(&self, account_id: i64) -> MessageResult<Vec<Message>> {
        self.find_by_posted_by(account_id).await
    }

    async fn create(&self, request: &CreateMessageRequest) -> MessageResult<Message> {
        self.create(request).await
    }

    async fn update_text(&self, id: i64, message_text: &str) -> MessageResult<u64> {
        self.update_text(id, message_text).await
    }

    async fn delete_by_id(&self, id: i64) -> MessageResult<u64> {
        self.delete_by_id(id).await
    }
}

/// Trait for the author existence check at message creation
pub trait AccountDirectory {
    async fn author_exists(&self, account_id: i64) -> MessageResult<bool>;
}

impl AccountDirectory for AccountRepository {
    async fn author_exists(&self, account_id: i64) -> MessageResult<bool> {
        self.exists(account_id)
            .await
            .map_err(|e| MessageError::DatabaseError(e.to_string()))
    }
}

impl AccountDirectory for MockAccountDirectory {
    async fn author_exists(&self, account_id: i64) -> MessageResult<bool> {
        self.contains(account_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(posted_by: i64, text: &str, epoch: i64) -> CreateMessageRequest {
        CreateMessageRequest {
            posted_by,
            message_text: text.to_string(),
            time_posted_epoch: epoch,
        }
    }

    async fn service_with_account(
        account_id: i64,
    ) -> MessageService<MockMessageRepository, MockAccountDirectory> {
        let (service, directory) = MessageService::new_for_testing();
        directory.register(account_id).await;
        service
    }

    #[tokio::test]
    async fn create_message_echoes_fields_verbatim() {
        let service = service_with_account(1).await;

        let message = service.create_message(request(1, "hi", 1000)).await.unwrap();

        assert!(message.id > 0);
        assert_eq!(message.posted_by, 1);
        assert_eq!(message.message_text, "hi");
        assert_eq!(message.time_posted_epoch, 1000);
    }

    #[tokio::test]
    async fn create_message_rejects_empty_text() {
        let service = service_with_account(1).await;

        let err = service.create_message(request(1, "", 1000)).await.unwrap_err();
        assert!(matches!(err, MessageError::InvalidMessageText));
    }

    #[tokio::test]
    async fn create_message_accepts_text_at_the_limit() {
        let service = service_with_account(1).await;

        let text = "x".repeat(255);
        let message = service.create_message(request(1, &text, 1000)).await.unwrap();
        assert_eq!(message.message_text.chars().count(), 255);
    }

    #[tokio::test]
    async fn create_message_rejects_text_over_the_limit() {
        let service = service_with_account(1).await;

        let text = "x".repeat(256);
        let err = service.create_message(request(1, &text, 1000)).await.unwrap_err();
        assert!(matches!(err, MessageError::InvalidMessageText));
    }

    #[tokio::test]
    async fn create_message_rejects_unknown_author() {
        let (service, _directory) = MessageService::new_for_testing();

        let err = service.create_message(request(7, "hi", 1000)).await.unwrap_err();
        assert!(matches!(err, MessageError::UnknownAuthor));
    }

    #[tokio::test]
    async fn get_message_by_id_reports_absence_as_none() {
        let (service, _directory) = MessageService::new_for_testing();

        assert_eq!(service.get_message_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_all_messages_returns_every_message() {
        let service = service_with_account(1).await;

        service.create_message(request(1, "first", 1000)).await.unwrap();
        service.create_message(request(1, "second", 2000)).await.unwrap();

        let all = service.get_all_messages().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn delete_missing_message_reports_zero_and_changes_nothing() {
        let service = service_with_account(1).await;
        let kept = service.create_message(request(1, "keep", 1000)).await.unwrap();

        assert_eq!(service.delete_message_by_id(kept.id + 1).await.unwrap(), 0);
        assert_eq!(service.get_all_messages().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_existing_message_reports_one_and_removes_it() {
        let service = service_with_account(1).await;
        let message = service.create_message(request(1, "gone", 1000)).await.unwrap();

        assert_eq!(service.delete_message_by_id(message.id).await.unwrap(), 1);
        assert_eq!(service.get_message_by_id(message.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_with_empty_text_reports_zero_and_keeps_original() {
        let service = service_with_account(1).await;
        let message = service.create_message(request(1, "original", 1000)).await.unwrap();

        assert_eq!(service.update_message_by_id(message.id, "").await.unwrap(), 0);

        let unchanged = service.get_message_by_id(message.id).await.unwrap().unwrap();
        assert_eq!(unchanged.message_text, "original");
    }

    #[tokio::test]
    async fn update_with_oversized_text_reports_zero() {
        let service = service_with_account(1).await;
        let message = service.create_message(request(1, "original", 1000)).await.unwrap();

        let text = "x".repeat(256);
        assert_eq!(service.update_message_by_id(message.id, &text).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_missing_message_reports_zero() {
        let (service, _directory) = MessageService::new_for_testing();

        assert_eq!(service.update_message_by_id(42, "new text").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_replaces_only_the_text() {
        let service = service_with_account(1).await;
        let message = service.create_message(request(1, "before", 1000)).await.unwrap();

        assert_eq!(
            service.update_message_by_id(message.id, "after").await.unwrap(),
            1
        );

        let updated = service.get_message_by_id(message.id).await.unwrap().unwrap();
        assert_eq!(updated.message_text, "after");
        assert_eq!(updated.posted_by, message.posted_by);
        assert_eq!(updated.time_posted_epoch, message.time_posted_epoch);
    }

    #[tokio::test]
    async fn update_does_not_revalidate_the_author() {
        let (service, directory) = MessageService::new_for_testing();
        directory.register(1).await;
        let message = service.create_message(request(1, "text", 1000)).await.unwrap();

        // Author checks happen at creation time only; the update succeeds even
        // though the directory no longer knows the account.
        directory.remove(1).await;

        assert_eq!(
            service.update_message_by_id(message.id, "edited").await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn list_by_account_filters_author_and_defaults_to_empty() {
        let (service, directory) = MessageService::new_for_testing();
        directory.register(1).await;
        directory.register(2).await;

        service.create_message(request(1, "mine", 1000)).await.unwrap();
        service.create_message(request(2, "theirs", 2000)).await.unwrap();
        service.create_message(request(1, "also mine", 3000)).await.unwrap();

        let mine = service.get_all_messages_by_account(1).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|m| m.posted_by == 1));

        let none = service.get_all_messages_by_account(99).await.unwrap();
        assert!(none.is_empty());
    }
}
