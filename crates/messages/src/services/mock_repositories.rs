//! Mock repository implementations for testing core service functionality

use soapbox_database::{CreateMessageRequest, Message, MessageResult};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory message repository for testing
pub struct MockMessageRepository {
    messages: Arc<RwLock<HashMap<i64, Message>>>,
    next_id: Arc<RwLock<i64>>,
}

impl MockMessageRepository {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> MessageResult<Option<Message>> {
        let messages = self.messages.read().await;
        Ok(messages.get(&id).cloned())
    }

    pub async fn find_all(&self) -> MessageResult<Vec<Message>> {
        let messages = self.messages.read().await;
        // Insertion order stands in for store-native order
        let mut all: Vec<Message> = messages.values().cloned().collect();
        all.sort_by_key(|m| m.id);
        Ok(all)
    }

    pub async fn find_by_posted_by(&self, account_id: i64) -> MessageResult<Vec<Message>> {
        let messages = self.messages.read().await;
        let mut authored: Vec<Message> = messages
            .values()
            .filter(|m| m.posted_by == account_id)
            .cloned()
            .collect();
        authored.sort_by_key(|m| m.id);
        Ok(authored)
    }

    pub async fn create(&self, request: &CreateMessageRequest) -> MessageResult<Message> {
        let mut next_id = self.next_id.write().await;
        let message_id = *next_id;
        *next_id += 1;

        let message = Message {
            id: message_id,
            posted_by: request.posted_by,
            message_text: request.message_text.clone(),
            time_posted_epoch: request.time_posted_epoch,
        };

        let mut messages = self.messages.write().await;
        messages.insert(message_id, message.clone());

        Ok(message)
    }

    pub async fn update_text(&self, id: i64, message_text: &str) -> MessageResult<u64> {
        let mut messages = self.messages.write().await;
        if let Some(message) = messages.get_mut(&id) {
            message.message_text = message_text.to_string();
            Ok(1)
        } else {
            Ok(0)
        }
    }

    pub async fn delete_by_id(&self, id: i64) -> MessageResult<u64> {
        let mut messages = self.messages.write().await;
        Ok(if messages.remove(&id).is_some() { 1 } else { 0 })
    }
}

impl Default for MockMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory stand-in for the account existence check
#[derive(Clone)]
pub struct MockAccountDirectory {
    account_ids: Arc<RwLock<HashSet<i64>>>,
}

impl MockAccountDirectory {
    pub fn new() -> Self {
        Self {
            account_ids: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Make the directory report the given account as existing
    pub async fn register(&self, account_id: i64) {
        self.account_ids.write().await.insert(account_id);
    }

    /// Forget an account
    pub async fn remove(&self, account_id: i64) {
        self.account_ids.write().await.remove(&account_id);
    }

    pub async fn contains(&self, account_id: i64) -> MessageResult<bool> {
        Ok(self.account_ids.read().await.contains(&account_id))
    }
}

impl Default for MockAccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}
