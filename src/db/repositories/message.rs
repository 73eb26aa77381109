use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::messages;
use crate::models::message::{Message, MessageInput};

pub struct MessageRepository {
    conn: DatabaseConnection,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, input: &MessageInput) -> Result<Message> {
        let model = messages::ActiveModel {
            name: Set(input.name.clone()),
            email: Set(input.email.clone()),
            subject: Set(input.subject.clone()),
            body: Set(input.body.clone()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert message")?;

        Ok(model.into())
    }

    /// All messages, newest first
    pub async fn list(&self) -> Result<Vec<Message>> {
        let rows = messages::Entity::find()
            .order_by_desc(messages::Column::CreatedAt)
            .order_by_desc(messages::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list messages")?;

        Ok(rows.into_iter().map(Message::from).collect())
    }
}
