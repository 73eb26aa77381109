use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::{OrderStatus, TransitionError};
use crate::entities::{order_items, orders, prelude::*};
use crate::models::order::{Order, OrderInput};

/// Result of a guarded status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Applied(OrderStatus),
    Rejected(TransitionError),
    NotFound,
}

pub struct OrderRepository {
    conn: DatabaseConnection,
}

impl OrderRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert the order and all of its items in one transaction.
    pub async fn create(&self, input: &OrderInput) -> Result<Order> {
        let txn = self.conn.begin().await?;

        let order = orders::ActiveModel {
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
            email: Set(input.email.clone()),
            address: Set(input.address.clone()),
            postal_code: Set(input.postal_code.clone()),
            city: Set(input.city.clone()),
            created_at: Set(chrono::Utc::now()),
            total_price: Set(input.total_price),
            paid: Set(false),
            payment_method: Set(input.payment_method.clone()),
            status: Set(OrderStatus::Pending.as_str().to_string()),
            user_id: Set(input.user_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert order")?;

        if !input.items.is_empty() {
            let item_models: Vec<order_items::ActiveModel> = input
                .items
                .iter()
                .map(|item| order_items::ActiveModel {
                    order_id: Set(order.id),
                    product_name: Set(item.product_name.clone()),
                    price: Set(item.price),
                    quantity: Set(item.quantity),
                    total: Set(item.total()),
                    ..Default::default()
                })
                .collect();

            OrderItems::insert_many(item_models)
                .exec(&txn)
                .await
                .context("Failed to insert order items")?;
        }

        let items = order
            .find_related(OrderItems)
            .order_by_asc(order_items::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;

        Ok(Order::from_models(order, items)?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Order>> {
        let Some(order) = Orders::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query order")?
        else {
            return Ok(None);
        };

        let items = order
            .find_related(OrderItems)
            .order_by_asc(order_items::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query order items")?;

        Ok(Some(Order::from_models(order, items)?))
    }

    /// Read the current status, apply the cancel transition and write it back
    /// within one transaction. A rejected transition writes nothing.
    pub async fn cancel(&self, id: i32) -> Result<StatusChange> {
        let txn = self.conn.begin().await?;

        let Some(order) = Orders::find_by_id(id)
            .one(&txn)
            .await
            .context("Failed to query order for cancel")?
        else {
            return Ok(StatusChange::NotFound);
        };

        let current: OrderStatus = order.status.parse()?;
        let next = match current.cancel() {
            Ok(next) => next,
            Err(rejection) => return Ok(StatusChange::Rejected(rejection)),
        };

        let mut active: orders::ActiveModel = order.into();
        active.status = Set(next.as_str().to_string());
        active
            .update(&txn)
            .await
            .context("Failed to update order status")?;

        txn.commit().await?;

        Ok(StatusChange::Applied(next))
    }
}
