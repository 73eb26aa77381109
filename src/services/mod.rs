pub mod account_service;
pub mod account_service_impl;
pub use account_service::{AccountError, AccountService, BootstrapOutcome, UserOutcome};
pub use account_service_impl::SeaOrmAccountService;

pub mod appointment_service;
pub mod appointment_service_impl;
pub use appointment_service::{AppointmentError, AppointmentService};
pub use appointment_service_impl::SeaOrmAppointmentService;

pub mod pet_booking_service;
pub mod pet_booking_service_impl;
pub use pet_booking_service::{PetBookingError, PetBookingService};
pub use pet_booking_service_impl::SeaOrmPetBookingService;

pub mod order_service;
pub mod order_service_impl;
pub use order_service::{OrderError, OrderService};
pub use order_service_impl::SeaOrmOrderService;

pub mod message_service;
pub mod message_service_impl;
pub use message_service::{MessageError, MessageService};
pub use message_service_impl::SeaOrmMessageService;
