use chrono::{NaiveDate, NaiveTime};
use petshop::config::{BootstrapConfig, Config};
use petshop::db::Store;
use petshop::domain::{OrderStatus, Role};
use petshop::entities::{order_items, orders};
use petshop::models::appointment::AppointmentInput;
use petshop::models::order::{OrderInput, OrderItemInput};
use petshop::services::{
    AccountError, AppointmentError, BootstrapOutcome, OrderError, UserOutcome,
};
use petshop::state::SharedState;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

async fn shared_state() -> SharedState {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let store = Store::new(&config.general.database_path)
        .await
        .expect("Failed to open store");
    SharedState::with_store(config, store)
}

fn order_input(items: Vec<OrderItemInput>) -> OrderInput {
    OrderInput {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: "asha@example.com".to_string(),
        address: "1 Kennel Lane".to_string(),
        postal_code: "40001".to_string(),
        city: "Pune".to_string(),
        total_price: 25.0,
        payment_method: "Cash on Delivery".to_string(),
        user_id: None,
        items,
    }
}

fn leash() -> OrderItemInput {
    OrderItemInput {
        product_name: "Leash".to_string(),
        price: 12.5,
        quantity: 2,
    }
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let state = shared_state().await;
    let bootstrap = BootstrapConfig::default();
    let accounts = &state.account_service;

    assert!(!accounts.admin_exists().await.unwrap());

    let outcome = accounts.bootstrap_admin(&bootstrap).await.unwrap();
    assert!(matches!(outcome, BootstrapOutcome::Created(_)));

    let outcome = accounts.bootstrap_admin(&bootstrap).await.unwrap();
    assert!(matches!(outcome, BootstrapOutcome::PasswordReset(_)));

    assert_eq!(state.store.count_accounts(Role::Admin).await.unwrap(), 1);

    let identity = accounts.authenticate("Bandar", "Kaju").await.unwrap();
    assert!(identity.is_admin());

    assert!(matches!(
        accounts.authenticate("Bandar", "kaju").await,
        Err(AccountError::InvalidCredentials)
    ));
    assert!(matches!(
        accounts.authenticate("nobody", "Kaju").await,
        Err(AccountError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_bootstrap_reset_changes_password() {
    let state = shared_state().await;
    let accounts = &state.account_service;

    accounts
        .bootstrap_admin(&BootstrapConfig::default())
        .await
        .unwrap();

    let rotated = BootstrapConfig {
        admin_password: "Badam".to_string(),
        ..BootstrapConfig::default()
    };
    accounts.bootstrap_admin(&rotated).await.unwrap();
    assert!(accounts.authenticate("Bandar", "Badam").await.is_ok());

    let frozen = BootstrapConfig {
        admin_password: "Pista".to_string(),
        reset_admin_password: false,
        ..BootstrapConfig::default()
    };
    let outcome = accounts.bootstrap_admin(&frozen).await.unwrap();
    assert!(matches!(outcome, BootstrapOutcome::Unchanged(_)));
    assert!(accounts.authenticate("Bandar", "Badam").await.is_ok());
}

#[tokio::test]
async fn test_signup_rejects_taken_email() {
    let state = shared_state().await;
    let accounts = &state.account_service;

    let account = accounts
        .signup("asha", "asha@example.com", "biscuit")
        .await
        .unwrap();
    assert_eq!(account.role, Role::User);

    let stored = state.store.get_account(account.id).await.unwrap().unwrap();
    assert_eq!(stored.email, "asha@example.com");

    assert!(matches!(
        accounts.signup("asha2", "asha@example.com", "biscuit").await,
        Err(AccountError::DuplicateEmail)
    ));
    assert_eq!(state.store.count_accounts(Role::User).await.unwrap(), 1);

    assert!(matches!(
        accounts.signup("asha", "other@example.com", "biscuit").await,
        Err(AccountError::DuplicateUsername)
    ));
    assert_eq!(state.store.count_accounts(Role::User).await.unwrap(), 1);
    assert!(
        state
            .store
            .get_account_by_username("asha")
            .await
            .unwrap()
            .is_some_and(|account| account.email == "asha@example.com")
    );
}

#[tokio::test]
async fn test_create_user_resets_existing_password() {
    let state = shared_state().await;
    let accounts = &state.account_service;

    let outcome = accounts
        .create_or_reset_user("asha", "asha@example.com", "biscuit")
        .await
        .unwrap();
    assert!(matches!(outcome, UserOutcome::Created(_)));

    let outcome = accounts
        .create_or_reset_user("asha", "asha@example.com", "cookie")
        .await
        .unwrap();
    assert!(matches!(outcome, UserOutcome::PasswordReset(_)));

    assert!(accounts.authenticate("asha", "cookie").await.is_ok());
    assert!(accounts.authenticate("asha", "biscuit").await.is_err());
}

#[tokio::test]
async fn test_order_status_transitions() {
    let state = shared_state().await;
    let orders_service = &state.order_service;

    let order = orders_service.place(&order_input(vec![leash()])).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert!((order.items[0].total - 25.0).abs() < f64::EPSILON);

    assert_eq!(
        orders_service.cancel(order.id).await.unwrap(),
        OrderStatus::Cancelled
    );
    assert!(matches!(
        orders_service.cancel(order.id).await,
        Err(OrderError::AlreadyCancelled)
    ));

    let delivered = orders_service.place(&order_input(vec![leash()])).await.unwrap();
    let model = orders::Entity::find_by_id(delivered.id)
        .one(&state.store.conn)
        .await
        .unwrap()
        .unwrap();
    let mut active: orders::ActiveModel = model.into();
    active.status = Set(OrderStatus::Delivered.as_str().to_string());
    active.update(&state.store.conn).await.unwrap();

    assert!(matches!(
        orders_service.cancel(delivered.id).await,
        Err(OrderError::AlreadyDelivered)
    ));
    assert_eq!(
        orders_service.get(delivered.id).await.unwrap().status,
        OrderStatus::Delivered
    );
}

#[tokio::test]
async fn test_deleting_order_removes_its_items() {
    let state = shared_state().await;
    let conn = &state.store.conn;

    let kibble = OrderItemInput {
        product_name: "Kibble".to_string(),
        price: 10.0,
        quantity: 1,
    };
    let order = state
        .order_service
        .place(&order_input(vec![leash(), kibble]))
        .await
        .unwrap();
    let kept = state
        .order_service
        .place(&order_input(vec![leash()]))
        .await
        .unwrap();
    assert_eq!(order_items::Entity::find().count(conn).await.unwrap(), 3);

    orders::Entity::delete_by_id(order.id).exec(conn).await.unwrap();

    assert_eq!(order_items::Entity::find().count(conn).await.unwrap(), 1);
    assert_eq!(state.order_service.get(kept.id).await.unwrap().items.len(), 1);
}

#[tokio::test]
async fn test_rejected_order_writes_nothing() {
    let state = shared_state().await;
    let orders_service = &state.order_service;

    assert!(matches!(
        orders_service.place(&order_input(Vec::new())).await,
        Err(OrderError::EmptyOrder)
    ));

    let mut negative = order_input(vec![leash()]);
    negative.total_price = -1.0;
    assert!(matches!(
        orders_service.place(&negative).await,
        Err(OrderError::Invalid(_))
    ));

    assert!(matches!(
        orders_service.get(1).await,
        Err(OrderError::NotFound(1))
    ));
}

#[tokio::test]
async fn test_time_slots_follow_bookings() {
    let state = shared_state().await;
    let appointments = &state.appointment_service;
    let date = NaiveDate::from_ymd_opt(2030, 7, 15).unwrap();

    let slots = appointments.time_slots(date).await.unwrap();
    assert_eq!(slots.available_slots.len(), 8);

    let booked = appointments
        .book(&AppointmentInput {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "555-0101".to_string(),
            date,
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            persons: 2,
        })
        .await
        .unwrap();

    let stored = appointments.get(booked.id).await.unwrap();
    assert_eq!(stored.persons, 2);
    assert!(matches!(
        appointments.get(booked.id + 1).await,
        Err(AppointmentError::NotFound(_))
    ));

    let slots = appointments.time_slots(date).await.unwrap();
    assert_eq!(slots.available_slots.len(), 7);
    assert_eq!(slots.booked_slots, vec!["10:00".to_string()]);

    let next_day = appointments
        .time_slots(date.succ_opt().unwrap())
        .await
        .unwrap();
    assert!(next_day.booked_slots.is_empty());
}
