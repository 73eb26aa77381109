//! `SeaORM` implementation of the `OrderService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{StatusChange, Store};
use crate::domain::{OrderStatus, ValidationError};
use crate::models::order::{Order, OrderInput};
use crate::services::order_service::{OrderError, OrderService};

pub struct SeaOrmOrderService {
    store: Store,
}

impl SeaOrmOrderService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderService for SeaOrmOrderService {
    async fn place(&self, input: &OrderInput) -> Result<Order, OrderError> {
        if input.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        if input.total_price < 0.0 {
            return Err(ValidationError::invalid_number(
                "total_price",
                "Total price cannot be negative",
            )
            .into());
        }

        let order = self.store.create_order(input).await?;

        info!(
            order_id = order.id,
            items = order.items.len(),
            total_price = order.total_price,
            "Order created"
        );
        Ok(order)
    }

    async fn get(&self, id: i32) -> Result<Order, OrderError> {
        self.store
            .get_order(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    async fn cancel(&self, id: i32) -> Result<OrderStatus, OrderError> {
        match self.store.cancel_order(id).await? {
            StatusChange::Applied(status) => {
                info!(order_id = id, "Order cancelled");
                Ok(status)
            }
            StatusChange::Rejected(rejection) => Err(rejection.into()),
            StatusChange::NotFound => Err(OrderError::NotFound(id)),
        }
    }
}
