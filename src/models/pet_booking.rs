use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::expected_delivery;
use crate::entities::pet_bookings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetBookingInput {
    pub pet_name: String,
    pub email: String,
    pub pet_type: String,
    pub breed: String,
    pub address: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetBooking {
    pub id: i32,
    pub pet_name: String,
    pub email: String,
    pub pet_type: String,
    pub breed: String,
    pub address: String,
    pub payment_method: String,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl PetBooking {
    #[must_use]
    pub fn expected_delivery(&self) -> NaiveDate {
        expected_delivery(self.created_at)
    }
}

impl From<pet_bookings::Model> for PetBooking {
    fn from(model: pet_bookings::Model) -> Self {
        Self {
            id: model.id,
            pet_name: model.pet_name,
            email: model.email,
            pet_type: model.pet_type,
            breed: model.breed,
            address: model.address,
            payment_method: model.payment_method,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}
