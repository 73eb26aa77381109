use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    #[serde(rename = "message")]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<messages::Model> for Message {
    fn from(model: messages::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            subject: model.subject,
            body: model.body,
            created_at: model.created_at,
        }
    }
}
