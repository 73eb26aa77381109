use chrono::{NaiveDate, NaiveTime};

use crate::entities::appointments;

/// A validated appointment request. `persons` is already known to be > 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub persons: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub persons: i32,
}

impl From<appointments::Model> for Appointment {
    fn from(model: appointments::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            date: model.date,
            time: model.time,
            persons: model.persons,
        }
    }
}
