use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::models::message::{Message, MessageInput};
use crate::services::message_service::{MessageError, MessageService};

pub struct SeaOrmMessageService {
    store: Store,
}

impl SeaOrmMessageService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageService for SeaOrmMessageService {
    async fn send(&self, input: &MessageInput) -> Result<Message, MessageError> {
        let message = self.store.create_message(input).await?;
        info!(message_id = message.id, subject = %message.subject, "Contact message stored");
        Ok(message)
    }

    async fn list(&self) -> Result<Vec<Message>, MessageError> {
        Ok(self.store.list_messages().await?)
    }
}
