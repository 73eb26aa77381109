use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::pet_bookings;
use crate::models::pet_booking::{PetBooking, PetBookingInput};

pub struct PetBookingRepository {
    conn: DatabaseConnection,
}

impl PetBookingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, input: &PetBookingInput, user_id: Option<i32>) -> Result<PetBooking> {
        let model = pet_bookings::ActiveModel {
            pet_name: Set(input.pet_name.clone()),
            email: Set(input.email.clone()),
            pet_type: Set(input.pet_type.clone()),
            breed: Set(input.breed.clone()),
            address: Set(input.address.clone()),
            payment_method: Set(input.payment_method.clone()),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert pet booking")?;

        Ok(model.into())
    }

    pub async fn get(&self, id: i32) -> Result<Option<PetBooking>> {
        let row = pet_bookings::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query pet booking")?;

        Ok(row.map(PetBooking::from))
    }

    /// Overwrite the descriptive fields. Owner and `created_at` are kept.
    pub async fn update(&self, id: i32, input: &PetBookingInput) -> Result<Option<PetBooking>> {
        let Some(existing) = pet_bookings::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query pet booking")?
        else {
            return Ok(None);
        };

        let mut active: pet_bookings::ActiveModel = existing.into();
        active.pet_name = Set(input.pet_name.clone());
        active.email = Set(input.email.clone());
        active.pet_type = Set(input.pet_type.clone());
        active.breed = Set(input.breed.clone());
        active.address = Set(input.address.clone());
        active.payment_method = Set(input.payment_method.clone());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update pet booking")?;

        Ok(Some(model.into()))
    }

    /// Bookings for an email, newest first
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<PetBooking>> {
        let rows = pet_bookings::Entity::find()
            .filter(pet_bookings::Column::Email.eq(email))
            .order_by_desc(pet_bookings::Column::CreatedAt)
            .order_by_desc(pet_bookings::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list pet bookings by email")?;

        Ok(rows.into_iter().map(PetBooking::from).collect())
    }
}
