use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::validation::require;
use super::{ApiError, ApiJson, ApiResponse, AppState};
use crate::domain::ValidationError;
use crate::models::message::{Message, MessageInput};
use crate::services::MessageError;

#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<MessageInput, ValidationError> {
        Ok(MessageInput {
            name: require("name", self.name.as_deref())?.to_string(),
            email: require("email", self.email.as_deref())?.to_string(),
            subject: require("subject", self.subject.as_deref())?.to_string(),
            body: require("message", self.message.as_deref())?.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageSent {
    pub message: &'static str,
    pub message_id: i32,
}

#[derive(Debug, Serialize)]
pub struct MessageList {
    pub messages: Vec<Message>,
}

impl From<MessageError> for ApiError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::Database(msg) => Self::DatabaseError(msg),
            MessageError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /api/contact
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.validate()?;
    let message = state.messages().send(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MessageSent {
            message: "Message sent successfully",
            message_id: message.id,
        })),
    ))
}

/// GET /api/messages
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<MessageList>>, ApiError> {
    let messages = state.messages().list().await?;
    Ok(Json(ApiResponse::success(MessageList { messages })))
}
