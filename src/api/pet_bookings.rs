use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::context::RequestContext;
use super::validation::{optional_id, require};
use super::{ApiError, ApiJson, ApiResponse, AppState};
use crate::domain::ValidationError;
use crate::models::pet_booking::{PetBooking, PetBookingInput};
use crate::services::PetBookingError;

#[derive(Debug, Default, Deserialize)]
pub struct PetBookingRequest {
    pub pet_name: Option<String>,
    pub email: Option<String>,
    pub pet_type: Option<String>,
    pub breed: Option<String>,
    pub address: Option<String>,
    pub payment_method: Option<String>,
    pub user_id: Option<Value>,
}

impl PetBookingRequest {
    pub fn validate(&self) -> Result<PetBookingInput, ValidationError> {
        Ok(PetBookingInput {
            pet_name: require("pet_name", self.pet_name.as_deref())?.to_string(),
            email: require("email", self.email.as_deref())?.to_string(),
            pet_type: require("pet_type", self.pet_type.as_deref())?.to_string(),
            breed: require("breed", self.breed.as_deref())?.to_string(),
            address: require("address", self.address.as_deref())?.to_string(),
            payment_method: require("payment_method", self.payment_method.as_deref())?
                .to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PetBookingDto {
    pub id: i32,
    pub pet_name: String,
    pub email: String,
    pub pet_type: String,
    pub breed: String,
    pub address: String,
    pub payment_method: String,
    pub booking_date: String,
    pub expected_delivery: String,
}

impl From<PetBooking> for PetBookingDto {
    fn from(b: PetBooking) -> Self {
        Self {
            expected_delivery: b.expected_delivery().format("%Y-%m-%d").to_string(),
            booking_date: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            id: b.id,
            pet_name: b.pet_name,
            email: b.email,
            pet_type: b.pet_type,
            breed: b.breed,
            address: b.address,
            payment_method: b.payment_method,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PetBookingSaved {
    pub message: &'static str,
    pub booking_id: i32,
    pub expected_delivery: String,
}

impl PetBookingSaved {
    fn new(message: &'static str, booking: &PetBooking) -> Self {
        Self {
            message,
            booking_id: booking.id,
            expected_delivery: booking.expected_delivery().format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PetBookingList {
    pub bookings: Vec<PetBookingDto>,
}

impl From<PetBookingError> for ApiError {
    fn from(err: PetBookingError) -> Self {
        match err {
            PetBookingError::NotFound(_) => Self::NotFound(err.to_string()),
            PetBookingError::Database(msg) => Self::DatabaseError(msg),
            PetBookingError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /api/pet_booking
/// Owner is the explicit `user_id`, else the signed-in account, else nobody
pub async fn create_pet_booking(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ApiJson(payload): ApiJson<PetBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.validate()?;

    let owner = match optional_id(payload.user_id.as_ref()) {
        Some(id) => Some(id),
        None => ctx.identity().await?.map(|identity| identity.id),
    };

    let booking = state.pet_bookings().book(&input, owner).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PetBookingSaved::new(
            "Pet booking successful",
            &booking,
        ))),
    ))
}

/// PUT /api/pet_booking/{id}
pub async fn update_pet_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<PetBookingRequest>,
) -> Result<Json<ApiResponse<PetBookingSaved>>, ApiError> {
    state.pet_bookings().get(id).await?;

    let input = payload.validate()?;
    let booking = state.pet_bookings().update(id, &input).await?;

    Ok(Json(ApiResponse::success(PetBookingSaved::new(
        "Pet booking updated successfully",
        &booking,
    ))))
}

/// GET /api/pet_bookings/{email}
pub async fn list_pet_bookings(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<PetBookingList>>, ApiError> {
    let bookings = state.pet_bookings().list_by_email(&email).await?;

    Ok(Json(ApiResponse::success(PetBookingList {
        bookings: bookings.into_iter().map(PetBookingDto::from).collect(),
    })))
}
