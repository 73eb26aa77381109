//! `SeaORM` implementation of the `AppointmentService` trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use crate::constants::schedule::AVAILABILITY_WINDOW_DAYS;
use crate::db::Store;
use crate::domain::ValidationError;
use crate::domain::schedule::{self, CalendarDay, SlotAvailability};
use crate::models::appointment::{Appointment, AppointmentInput};
use crate::services::appointment_service::{AppointmentError, AppointmentService};

pub struct SeaOrmAppointmentService {
    store: Store,
}

impl SeaOrmAppointmentService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn check_persons(input: &AppointmentInput) -> Result<(), AppointmentError> {
    if input.persons <= 0 {
        return Err(ValidationError::invalid_number(
            "persons",
            "Number of persons must be greater than 0",
        )
        .into());
    }
    Ok(())
}

#[async_trait]
impl AppointmentService for SeaOrmAppointmentService {
    async fn book(&self, input: &AppointmentInput) -> Result<Appointment, AppointmentError> {
        check_persons(input)?;

        let appointment = self.store.create_appointment(input).await?;

        info!(
            appointment_id = appointment.id,
            date = %appointment.date,
            time = %appointment.time.format("%H:%M"),
            "Appointment booked"
        );
        Ok(appointment)
    }

    async fn get(&self, id: i32) -> Result<Appointment, AppointmentError> {
        self.store
            .get_appointment(id)
            .await?
            .ok_or(AppointmentError::NotFound(id))
    }

    async fn update(
        &self,
        id: i32,
        input: &AppointmentInput,
    ) -> Result<Appointment, AppointmentError> {
        check_persons(input)?;

        self.store
            .update_appointment(id, input)
            .await?
            .ok_or(AppointmentError::NotFound(id))
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.store.list_appointments_by_email(email).await?)
    }

    async fn time_slots(&self, date: NaiveDate) -> Result<SlotAvailability, AppointmentError> {
        let booked = self.store.booked_times(date).await?;
        Ok(schedule::slot_availability(&booked))
    }

    fn available_dates(&self, today: NaiveDate) -> Vec<CalendarDay> {
        schedule::available_dates(today, AVAILABILITY_WINDOW_DAYS)
    }
}
