use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::models::pet_booking::{PetBooking, PetBookingInput};
use crate::services::pet_booking_service::{PetBookingError, PetBookingService};

pub struct SeaOrmPetBookingService {
    store: Store,
}

impl SeaOrmPetBookingService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PetBookingService for SeaOrmPetBookingService {
    async fn book(
        &self,
        input: &PetBookingInput,
        owner: Option<i32>,
    ) -> Result<PetBooking, PetBookingError> {
        let booking = self.store.create_pet_booking(input, owner).await?;

        info!(
            booking_id = booking.id,
            pet_type = %booking.pet_type,
            owner = ?booking.user_id,
            "Pet booked"
        );
        Ok(booking)
    }

    async fn get(&self, id: i32) -> Result<PetBooking, PetBookingError> {
        self.store
            .get_pet_booking(id)
            .await?
            .ok_or(PetBookingError::NotFound(id))
    }

    async fn update(
        &self,
        id: i32,
        input: &PetBookingInput,
    ) -> Result<PetBooking, PetBookingError> {
        self.store
            .update_pet_booking(id, input)
            .await?
            .ok_or(PetBookingError::NotFound(id))
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<PetBooking>, PetBookingError> {
        Ok(self.store.list_pet_bookings_by_email(email).await?)
    }
}
