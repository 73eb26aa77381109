use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AccountService, AppointmentService, MessageService, OrderService, PetBookingService,
    SeaOrmAccountService, SeaOrmAppointmentService, SeaOrmMessageService, SeaOrmOrderService,
    SeaOrmPetBookingService,
};

/// Long-lived handles shared by the HTTP surface and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub account_service: Arc<dyn AccountService>,

    pub appointment_service: Arc<dyn AppointmentService>,

    pub pet_booking_service: Arc<dyn PetBookingService>,

    pub order_service: Arc<dyn OrderService>,

    pub message_service: Arc<dyn MessageService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wire the services over an already opened store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let account_service = Arc::new(SeaOrmAccountService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AccountService>;

        let appointment_service =
            Arc::new(SeaOrmAppointmentService::new(store.clone())) as Arc<dyn AppointmentService>;

        let pet_booking_service =
            Arc::new(SeaOrmPetBookingService::new(store.clone())) as Arc<dyn PetBookingService>;

        let order_service =
            Arc::new(SeaOrmOrderService::new(store.clone())) as Arc<dyn OrderService>;

        let message_service =
            Arc::new(SeaOrmMessageService::new(store.clone())) as Arc<dyn MessageService>;

        Self {
            config: Arc::new(config),
            store,
            account_service,
            appointment_service,
            pet_booking_service,
            order_service,
            message_service,
        }
    }
}
