//! Per-request view of the server-side session.
//!
//! Handlers never touch session keys directly; they go through
//! [`RequestContext`] for the signed-in identity and page-scoped flashes.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tower_sessions::Session;

use super::ApiError;
use crate::constants::session::{IDENTITY_KEY, PAGE_FLASHES_KEY};
use crate::domain::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Danger,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub message: String,
    pub category: FlashCategory,
}

/// Pending flashes keyed by page, each list in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashBuffer(HashMap<String, Vec<FlashMessage>>);

impl FlashBuffer {
    pub fn push(&mut self, page: &str, message: impl Into<String>, category: FlashCategory) {
        self.0
            .entry(page.to_string())
            .or_default()
            .push(FlashMessage {
                message: message.into(),
                category,
            });
    }

    /// Removes and returns the page's flashes.
    pub fn take(&mut self, page: &str) -> Vec<FlashMessage> {
        self.0.remove(page).unwrap_or_default()
    }

    #[must_use]
    pub fn has(&self, page: &str) -> bool {
        self.0.get(page).is_some_and(|list| !list.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

#[derive(Clone)]
pub struct RequestContext(Session);

impl RequestContext {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    pub async fn identity(&self) -> Result<Option<Identity>, ApiError> {
        Ok(self.0.get::<Identity>(IDENTITY_KEY).await?)
    }

    /// Attach an identity, rotating the session id first.
    pub async fn sign_in(&self, identity: &Identity) -> Result<(), ApiError> {
        self.0.cycle_id().await?;
        self.0.insert(IDENTITY_KEY, identity).await?;
        Ok(())
    }

    /// Drops the whole session, pending flashes included.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.0.flush().await?;
        Ok(())
    }

    pub async fn flash(
        &self,
        page: &str,
        message: impl Into<String>,
        category: FlashCategory,
    ) -> Result<(), ApiError> {
        let mut buffer = self.flash_buffer().await?;
        buffer.push(page, message, category);
        self.0.insert(PAGE_FLASHES_KEY, buffer).await?;
        Ok(())
    }

    /// Drains the page's flashes so each is shown once.
    pub async fn take_flashes(&self, page: &str) -> Result<Vec<FlashMessage>, ApiError> {
        let mut buffer = self.flash_buffer().await?;
        if !buffer.has(page) {
            return Ok(Vec::new());
        }

        let flashes = buffer.take(page);
        if buffer.is_empty() {
            self.0.remove::<FlashBuffer>(PAGE_FLASHES_KEY).await?;
        } else {
            self.0.insert(PAGE_FLASHES_KEY, buffer).await?;
        }
        Ok(flashes)
    }

    async fn flash_buffer(&self) -> Result<FlashBuffer, ApiError> {
        Ok(self
            .0
            .get::<FlashBuffer>(PAGE_FLASHES_KEY)
            .await?
            .unwrap_or_default())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(Self::new)
    }
}
