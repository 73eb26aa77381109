pub mod prelude;

pub mod accounts;
pub mod appointments;
pub mod messages;
pub mod order_items;
pub mod orders;
pub mod pet_bookings;
