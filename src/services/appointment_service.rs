//! Domain service for appointments and slot availability.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::ValidationError;
use crate::domain::schedule::{CalendarDay, SlotAvailability};
use crate::models::appointment::{Appointment, AppointmentInput};

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Appointment not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AppointmentError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AppointmentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait AppointmentService: Send + Sync {
    /// Books an appointment. Slots are not locked, so double booking is possible.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentError::Invalid`] when `persons` is not positive.
    async fn book(&self, input: &AppointmentInput) -> Result<Appointment, AppointmentError>;

    async fn get(&self, id: i32) -> Result<Appointment, AppointmentError>;

    async fn update(
        &self,
        id: i32,
        input: &AppointmentInput,
    ) -> Result<Appointment, AppointmentError>;

    /// Latest date first, then latest time.
    async fn list_by_email(&self, email: &str) -> Result<Vec<Appointment>, AppointmentError>;

    async fn time_slots(&self, date: NaiveDate) -> Result<SlotAvailability, AppointmentError>;

    /// Bookable weekdays after `today`. Does not look at existing bookings.
    fn available_dates(&self, today: NaiveDate) -> Vec<CalendarDay>;
}
