use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::appointments;
use crate::models::appointment::{Appointment, AppointmentInput};

pub struct AppointmentRepository {
    conn: DatabaseConnection,
}

impl AppointmentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, input: &AppointmentInput) -> Result<Appointment> {
        let model = appointments::ActiveModel {
            name: Set(input.name.clone()),
            email: Set(input.email.clone()),
            phone: Set(input.phone.clone()),
            date: Set(input.date),
            time: Set(input.time),
            persons: Set(input.persons),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert appointment")?;

        Ok(model.into())
    }

    /// Overwrite every field of an appointment. Returns `None` when the id is unknown.
    pub async fn update(&self, id: i32, input: &AppointmentInput) -> Result<Option<Appointment>> {
        let Some(existing) = appointments::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query appointment")?
        else {
            return Ok(None);
        };

        let mut active: appointments::ActiveModel = existing.into();
        active.name = Set(input.name.clone());
        active.email = Set(input.email.clone());
        active.phone = Set(input.phone.clone());
        active.date = Set(input.date);
        active.time = Set(input.time);
        active.persons = Set(input.persons);

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update appointment")?;

        Ok(Some(model.into()))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Appointment>> {
        let model = appointments::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query appointment")?;

        Ok(model.map(Appointment::from))
    }

    /// Appointments for an email, latest date first, then latest time
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<Appointment>> {
        let rows = appointments::Entity::find()
            .filter(appointments::Column::Email.eq(email))
            .order_by_desc(appointments::Column::Date)
            .order_by_desc(appointments::Column::Time)
            .order_by_desc(appointments::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list appointments by email")?;

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    /// Times already booked on `date`, in booking order
    pub async fn booked_times(&self, date: NaiveDate) -> Result<Vec<NaiveTime>> {
        let times: Vec<NaiveTime> = appointments::Entity::find()
            .select_only()
            .column(appointments::Column::Time)
            .filter(appointments::Column::Date.eq(date))
            .order_by_asc(appointments::Column::Id)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to query booked times")?;

        Ok(times)
    }
}
