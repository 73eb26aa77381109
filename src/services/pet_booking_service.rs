use thiserror::Error;

use crate::models::pet_booking::{PetBooking, PetBookingInput};

#[derive(Debug, Error)]
pub enum PetBookingError {
    #[error("Booking not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for PetBookingError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PetBookingError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait PetBookingService: Send + Sync {
    /// Records a booking. `owner` is a weak reference to an account id.
    async fn book(
        &self,
        input: &PetBookingInput,
        owner: Option<i32>,
    ) -> Result<PetBooking, PetBookingError>;

    async fn get(&self, id: i32) -> Result<PetBooking, PetBookingError>;

    /// Overwrites the descriptive fields. The owner and creation time stay.
    async fn update(
        &self,
        id: i32,
        input: &PetBookingInput,
    ) -> Result<PetBooking, PetBookingError>;

    /// Newest first.
    async fn list_by_email(&self, email: &str) -> Result<Vec<PetBooking>, PetBookingError>;
}
