use thiserror::Error;

use crate::models::message::{Message, MessageInput};

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MessageError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MessageError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait MessageService: Send + Sync {
    async fn send(&self, input: &MessageInput) -> Result<Message, MessageError>;

    /// Every stored message, newest first.
    async fn list(&self) -> Result<Vec<Message>, MessageError>;
}
