use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::Role;
use crate::models::appointment::{Appointment, AppointmentInput};
use crate::models::message::{Message, MessageInput};
use crate::models::order::{Order, OrderInput};
use crate::models::pet_booking::{PetBooking, PetBookingInput};

pub mod migrator;
pub mod repositories;

pub use repositories::account::Account;
pub use repositories::order::StatusChange;

/// Idle and lifetime limit for the single in-memory connection. Recycling it
/// would swap in a fresh, unmigrated database.
const IN_MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

fn pool_options(
    db_url: &str,
    in_memory: bool,
    max_connections: u32,
    min_connections: u32,
) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url.to_string());

    if in_memory {
        // Every SQLite connection gets its own private in-memory database
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_CONNECTION_LIFETIME)
            .max_lifetime(IN_MEMORY_CONNECTION_LIFETIME);
    } else {
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600));
    }

    opt.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    opt
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let opt = pool_options(db_url, in_memory, max_connections, min_connections);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn message_repo(&self) -> repositories::message::MessageRepository {
        repositories::message::MessageRepository::new(self.conn.clone())
    }

    fn appointment_repo(&self) -> repositories::appointment::AppointmentRepository {
        repositories::appointment::AppointmentRepository::new(self.conn.clone())
    }

    fn pet_booking_repo(&self) -> repositories::pet_booking::PetBookingRepository {
        repositories::pet_booking::PetBookingRepository::new(self.conn.clone())
    }

    fn order_repo(&self) -> repositories::order::OrderRepository {
        repositories::order::OrderRepository::new(self.conn.clone())
    }

    // Accounts

    pub async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.account_repo().get_by_username(username).await
    }

    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.account_repo().get_by_email(email).await
    }

    pub async fn get_account(&self, id: i32) -> Result<Option<Account>> {
        self.account_repo().get_by_id(id).await
    }

    pub async fn first_admin(&self) -> Result<Option<Account>> {
        self.account_repo().first_admin().await
    }

    pub async fn count_accounts(&self, role: Role) -> Result<u64> {
        self.account_repo().count_by_role(role).await
    }

    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
        config: &SecurityConfig,
    ) -> Result<Account> {
        self.account_repo()
            .create(username, email, password, role, config)
            .await
    }

    pub async fn verify_account_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>> {
        self.account_repo()
            .verify_password(username, password)
            .await
    }

    pub async fn update_account_password(
        &self,
        username: &str,
        new_password: &str,
        config: &SecurityConfig,
    ) -> Result<()> {
        self.account_repo()
            .update_password(username, new_password, config)
            .await
    }

    // Messages

    pub async fn create_message(&self, input: &MessageInput) -> Result<Message> {
        self.message_repo().create(input).await
    }

    pub async fn list_messages(&self) -> Result<Vec<Message>> {
        self.message_repo().list().await
    }

    // Appointments

    pub async fn create_appointment(&self, input: &AppointmentInput) -> Result<Appointment> {
        self.appointment_repo().create(input).await
    }

    pub async fn update_appointment(
        &self,
        id: i32,
        input: &AppointmentInput,
    ) -> Result<Option<Appointment>> {
        self.appointment_repo().update(id, input).await
    }

    pub async fn get_appointment(&self, id: i32) -> Result<Option<Appointment>> {
        self.appointment_repo().get(id).await
    }

    pub async fn list_appointments_by_email(&self, email: &str) -> Result<Vec<Appointment>> {
        self.appointment_repo().list_by_email(email).await
    }

    pub async fn booked_times(&self, date: NaiveDate) -> Result<Vec<NaiveTime>> {
        self.appointment_repo().booked_times(date).await
    }

    // Pet bookings

    pub async fn create_pet_booking(
        &self,
        input: &PetBookingInput,
        user_id: Option<i32>,
    ) -> Result<PetBooking> {
        self.pet_booking_repo().create(input, user_id).await
    }

    pub async fn update_pet_booking(
        &self,
        id: i32,
        input: &PetBookingInput,
    ) -> Result<Option<PetBooking>> {
        self.pet_booking_repo().update(id, input).await
    }

    pub async fn get_pet_booking(&self, id: i32) -> Result<Option<PetBooking>> {
        self.pet_booking_repo().get(id).await
    }

    pub async fn list_pet_bookings_by_email(&self, email: &str) -> Result<Vec<PetBooking>> {
        self.pet_booking_repo().list_by_email(email).await
    }

    // Orders

    pub async fn create_order(&self, input: &OrderInput) -> Result<Order> {
        self.order_repo().create(input).await
    }

    pub async fn get_order(&self, id: i32) -> Result<Option<Order>> {
        self.order_repo().get(id).await
    }

    pub async fn cancel_order(&self, id: i32) -> Result<StatusChange> {
        self.order_repo().cancel(id).await
    }
}
