pub use super::accounts::Entity as Accounts;
pub use super::appointments::Entity as Appointments;
pub use super::messages::Entity as Messages;
pub use super::order_items::Entity as OrderItems;
pub use super::orders::Entity as Orders;
pub use super::pet_bookings::Entity as PetBookings;
