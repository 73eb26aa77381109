use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{OrderStatus, UnknownVariant, expected_delivery};
use crate::entities::{order_items, orders};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemInput {
    pub product_name: String,
    pub price: f64,
    pub quantity: i32,
}

impl OrderItemInput {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A validated order. Line items have already been coerced; an empty item
/// list never reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub total_price: f64,
    pub payment_method: String,
    pub user_id: Option<i32>,
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub product_name: String,
    pub price: f64,
    pub quantity: i32,
    pub total: f64,
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            product_name: model.product_name,
            price: model.price,
            quantity: model.quantity,
            total: model.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
    pub paid: bool,
    pub payment_method: String,
    pub status: OrderStatus,
    pub user_id: Option<i32>,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn from_models(
        order: orders::Model,
        items: Vec<order_items::Model>,
    ) -> Result<Self, UnknownVariant> {
        Ok(Self {
            id: order.id,
            first_name: order.first_name,
            last_name: order.last_name,
            email: order.email,
            address: order.address,
            postal_code: order.postal_code,
            city: order.city,
            created_at: order.created_at,
            total_price: order.total_price,
            paid: order.paid,
            payment_method: order.payment_method,
            status: order.status.parse()?,
            user_id: order.user_id,
            items: items.into_iter().map(OrderItem::from).collect(),
        })
    }

    #[must_use]
    pub fn expected_delivery(&self) -> NaiveDate {
        expected_delivery(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_total_is_price_times_quantity() {
        let item = OrderItemInput {
            product_name: "Bird seed".to_string(),
            price: 10.0,
            quantity: 2,
        };
        assert!((item.total() - 20.0).abs() < f64::EPSILON);
    }
}
