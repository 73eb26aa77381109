//! Domain service for orders and their line items.

use thiserror::Error;

use crate::domain::{OrderStatus, TransitionError, ValidationError};
use crate::models::order::{Order, OrderInput};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Order {0} not found")]
    NotFound(i32),

    #[error("Order is already cancelled")]
    AlreadyCancelled,

    #[error("Cannot cancel an order that has already been delivered")]
    AlreadyDelivered,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TransitionError> for OrderError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::AlreadyCancelled => Self::AlreadyCancelled,
            TransitionError::AlreadyDelivered => Self::AlreadyDelivered,
        }
    }
}

impl From<sea_orm::DbErr> for OrderError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for OrderError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait OrderService: Send + Sync {
    /// Stores the order and all of its items atomically.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyOrder`] for an order without items and
    /// [`OrderError::Invalid`] for a negative total. Nothing is written then.
    async fn place(&self, input: &OrderInput) -> Result<Order, OrderError>;

    async fn get(&self, id: i32) -> Result<Order, OrderError>;

    /// Moves a pending order to `cancelled`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::AlreadyCancelled`] or
    /// [`OrderError::AlreadyDelivered`] for terminal orders, leaving them as is.
    async fn cancel(&self, id: i32) -> Result<OrderStatus, OrderError>;
}
