use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::validation::{parse_date, parse_flexible_date, parse_time, persons_from_json, require};
use super::{ApiError, ApiJson, ApiResponse, AppState};
use crate::domain::ValidationError;
use crate::domain::schedule::CalendarDay;
use crate::models::appointment::{Appointment, AppointmentInput};
use crate::services::AppointmentError;

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub persons: Option<Value>,
}

impl AppointmentRequest {
    /// Presence first, then formats. Dates may be `YYYY-MM-DD` or `DD-MM-YYYY`.
    pub fn validate(&self) -> Result<AppointmentInput, ValidationError> {
        let name = require("name", self.name.as_deref())?;
        let email = require("email", self.email.as_deref())?;
        let phone = require("phone", self.phone.as_deref())?;
        let date = require("date", self.date.as_deref())?;
        let time = require("time", self.time.as_deref())?;
        let persons = match &self.persons {
            None | Some(Value::Null) => return Err(ValidationError::missing("persons")),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(ValidationError::missing("persons"));
            }
            Some(value) => value,
        };

        Ok(AppointmentInput {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            date: parse_flexible_date("date", date)?,
            time: parse_time("time", time)?,
            persons: persons_from_json(persons)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AppointmentDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub persons: i32,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            phone: a.phone,
            date: a.date.format("%Y-%m-%d").to_string(),
            time: a.time.format("%H:%M").to_string(),
            persons: a.persons,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppointmentCreated {
    pub message: &'static str,
    pub appointment_id: i32,
    pub name: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct AppointmentUpdated {
    pub message: &'static str,
    pub appointment_id: i32,
}

#[derive(Debug, Serialize)]
pub struct AppointmentList {
    pub appointments: Vec<AppointmentDto>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available_dates: Vec<CalendarDay>,
    pub booking_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct TimeSlotsQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimeSlotsResponse {
    pub date: String,
    pub available_slots: Vec<String>,
    pub booked_slots: Vec<String>,
}

impl From<AppointmentError> for ApiError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Invalid(e) => e.into(),
            AppointmentError::NotFound(_) => Self::NotFound(err.to_string()),
            AppointmentError::Database(msg) => Self::DatabaseError(msg),
            AppointmentError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /api/appointment
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<AppointmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.validate()?;
    let appointment = state.appointments().book(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AppointmentCreated {
            message: "Appointment booked successfully",
            appointment_id: appointment.id,
            date: appointment.date.format("%Y-%m-%d").to_string(),
            time: appointment.time.format("%H:%M").to_string(),
            name: appointment.name,
        })),
    ))
}

/// PUT /api/appointment/{id}
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<AppointmentRequest>,
) -> Result<Json<ApiResponse<AppointmentUpdated>>, ApiError> {
    // Unknown ids answer 404 whatever the body holds
    state.appointments().get(id).await?;

    let input = payload.validate()?;
    let appointment = state.appointments().update(id, &input).await?;

    Ok(Json(ApiResponse::success(AppointmentUpdated {
        message: "Appointment updated successfully",
        appointment_id: appointment.id,
    })))
}

/// GET /api/appointments/{email}
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<AppointmentList>>, ApiError> {
    let appointments = state.appointments().list_by_email(&email).await?;

    Ok(Json(ApiResponse::success(AppointmentList {
        appointments: appointments.into_iter().map(AppointmentDto::from).collect(),
    })))
}

/// GET /api/appointment/availability
pub async fn availability(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<AvailabilityResponse>> {
    let today = chrono::Local::now().date_naive();

    Json(ApiResponse::success(AvailabilityResponse {
        available_dates: state.appointments().available_dates(today),
        booking_enabled: true,
    }))
}

/// GET /api/appointment/time-slots?date=YYYY-MM-DD
pub async fn time_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TimeSlotsQuery>,
) -> Result<Json<ApiResponse<TimeSlotsResponse>>, ApiError> {
    let raw = query
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Date parameter is required"))?;

    let date = parse_date("date", &raw)
        .map_err(|_| ApiError::validation("Invalid date format. Use YYYY-MM-DD"))?;

    let slots = state.appointments().time_slots(date).await?;

    Ok(Json(ApiResponse::success(TimeSlotsResponse {
        date: raw,
        available_slots: slots.available_slots,
        booked_slots: slots.booked_slots,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationReason;
    use serde_json::json;

    fn request(date: &str, persons: Value) -> AppointmentRequest {
        AppointmentRequest {
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: Some("555-0101".to_string()),
            date: Some(date.to_string()),
            time: Some("10:00".to_string()),
            persons: Some(persons),
        }
    }

    #[test]
    fn day_first_dates_are_accepted() {
        let input = request("15-07-2025", json!(2)).validate().unwrap();
        assert_eq!(input.date.to_string(), "2025-07-15");
        assert_eq!(input.persons, 2);
    }

    #[test]
    fn zero_persons_is_rejected() {
        let err = request("2025-07-15", json!(0)).validate().unwrap_err();
        assert_eq!(err.reason, ValidationReason::InvalidNumber);
    }

    #[test]
    fn missing_persons_is_a_missing_field() {
        let mut req = request("2025-07-15", json!(1));
        req.persons = None;
        assert_eq!(
            req.validate().unwrap_err().reason,
            ValidationReason::MissingField
        );
    }
}
