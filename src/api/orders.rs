use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::warn;

use super::validation::{json_text, optional_id, order_item, total_price};
use super::{ApiError, ApiJson, ApiResponse, AppState, MessageResponse};
use crate::constants::orders::DEFAULT_PAYMENT_METHOD;
use crate::domain::{OrderStatus, ValidationError};
use crate::models::order::{Order, OrderInput, OrderItem};
use crate::services::OrderError;

const REQUIRED_FIELDS: [&str; 6] = [
    "first_name",
    "last_name",
    "email",
    "address",
    "postal_code",
    "city",
];

/// Builds an order from a loosely typed body.
///
/// All missing contact fields are reported together. Line items that are not
/// objects are skipped; junk inside an item is coerced instead of rejected.
pub fn order_input(body: &Map<String, Value>) -> Result<OrderInput, ValidationError> {
    let values = REQUIRED_FIELDS
        .map(|field| json_text(body.get(field)).filter(|v| !v.trim().is_empty()));

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| *field)
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::missing_fields(&missing));
    }

    let [first_name, last_name, email, address, postal_code, city] =
        values.map(Option::unwrap_or_default);

    let items = match body.get("items") {
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let item = order_item(entry);
                if item.is_none() {
                    warn!(index, "Skipping order item that is not an object");
                }
                item
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(OrderInput {
        first_name,
        last_name,
        email,
        address,
        postal_code,
        city,
        total_price: total_price(body.get("total_price"))?,
        payment_method: json_text(body.get("payment_method"))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        user_id: optional_id(body.get("user_id")),
        items,
    })
}

#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub message: &'static str,
    pub order_id: i32,
    pub expected_delivery: String,
}

#[derive(Debug, Serialize)]
pub struct OrderItemDto {
    pub id: i32,
    pub product_name: String,
    pub price: f64,
    pub quantity: i32,
    pub total: f64,
}

impl From<OrderItem> for OrderItemDto {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            product_name: item.product_name,
            price: item.price,
            quantity: item.quantity,
            total: item.total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub created_at: String,
    pub total_price: f64,
    pub paid: bool,
    pub payment_method: String,
    pub status: OrderStatus,
    pub user_id: Option<i32>,
    pub items: Vec<OrderItemDto>,
    pub expected_delivery: String,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            expected_delivery: order.expected_delivery().format("%Y-%m-%d").to_string(),
            created_at: order.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            id: order.id,
            first_name: order.first_name,
            last_name: order.last_name,
            email: order.email,
            address: order.address,
            postal_code: order.postal_code,
            city: order.city,
            total_price: order.total_price,
            paid: order.paid,
            payment_method: order.payment_method,
            status: order.status,
            user_id: order.user_id,
            items: order.items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderDetail {
    pub order: OrderDto,
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Invalid(e) => e.into(),
            OrderError::EmptyOrder => Self::validation(err.to_string()),
            OrderError::NotFound(_) => Self::NotFound(err.to_string()),
            OrderError::AlreadyCancelled | OrderError::AlreadyDelivered => {
                Self::Conflict(err.to_string())
            }
            OrderError::Database(msg) => Self::DatabaseError(msg),
            OrderError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(body) = body.as_object() else {
        return Err(ApiError::validation(
            "Invalid JSON format: expected an object",
        ));
    };

    let input = order_input(body)?;
    let order = state.orders().place(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(OrderCreated {
            message: "Order created successfully",
            order_id: order.id,
            expected_delivery: order.expected_delivery().format("%Y-%m-%d").to_string(),
        })),
    ))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<OrderDetail>>, ApiError> {
    let order = state.orders().get(id).await?;

    Ok(Json(ApiResponse::success(OrderDetail {
        order: order.into(),
    })))
}

/// POST /api/orders/{id}/cancel
pub async fn cancel_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.orders().cancel(id).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Order {id} has been cancelled successfully"
    )))))
}
