pub mod appointment;
pub mod message;
pub mod order;
pub mod pet_booking;
