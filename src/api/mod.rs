use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::state::SharedState;

pub mod appointments;
pub mod auth;
pub mod contact;
pub mod context;
mod error;
mod observability;
pub mod orders;
pub mod pages;
pub mod pet_bookings;
mod system;
mod types;
pub mod validation;

pub use context::{FlashCategory, FlashMessage, RequestContext};
pub use error::ApiError;
pub use types::*;

use crate::services::{
    AccountService, AppointmentService, MessageService, OrderService, PetBookingService,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn accounts(&self) -> &Arc<dyn AccountService> {
        &self.shared.account_service
    }

    #[must_use]
    pub fn appointments(&self) -> &Arc<dyn AppointmentService> {
        &self.shared.appointment_service
    }

    #[must_use]
    pub fn pet_bookings(&self) -> &Arc<dyn PetBookingService> {
        &self.shared.pet_booking_service
    }

    #[must_use]
    pub fn orders(&self) -> &Arc<dyn OrderService> {
        &self.shared.order_service
    }

    #[must_use]
    pub fn messages(&self) -> &Arc<dyn MessageService> {
        &self.shared.message_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = state.config().server.clone();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .merge(create_page_router())
        .nest("/api", create_api_router())
        .nest_service("/static", ServeDir::new(&server.static_path))
        .fallback(not_found)
        .layer(session_layer)
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_page_router() -> Router<Arc<AppState>> {
    let login_required = Router::new()
        .route("/logout", get(pages::logout))
        .route("/contact", get(pages::contact_page))
        .route("/appointment", get(pages::appointment_page))
        .route("/booking", get(pages::booking_page))
        .route("/book_pet", post(pages::book_pet))
        .route("/messages", get(pages::messages_page))
        .route_layer(middleware::from_fn(auth::require_login_page));

    let admin_only = Router::new()
        .route("/admin_dashboard", get(pages::admin_dashboard))
        .route_layer(middleware::from_fn(auth::require_admin_page));

    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login_page).post(pages::login))
        .route("/signup", get(pages::signup_page).post(pages::signup))
        .route("/send_message", post(pages::send_message))
        .route("/book_appointment", post(pages::book_appointment))
        .merge(login_required)
        .merge(admin_only)
}

fn create_api_router() -> Router<Arc<AppState>> {
    let admin_only = Router::new()
        .route("/messages", get(contact::list_messages))
        .route_layer(middleware::from_fn(auth::require_admin_api));

    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/signup", post(auth::signup))
        .route("/appointment", post(appointments::create_appointment))
        .route("/appointment/{id}", put(appointments::update_appointment))
        .route("/appointments/{email}", get(appointments::list_appointments))
        .route(
            "/appointment/availability",
            get(appointments::availability),
        )
        .route("/appointment/time-slots", get(appointments::time_slots))
        .route("/contact", post(contact::send_message))
        .route("/pet_booking", post(pet_bookings::create_pet_booking))
        .route("/pet_booking/{id}", put(pet_bookings::update_pet_booking))
        .route("/pet_bookings/{email}", get(pet_bookings::list_pet_bookings))
        .route("/orders", post(orders::create_order))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/cancel", post(orders::cancel_order))
        .route("/status", get(system::get_status))
        .route("/metrics", get(observability::get_metrics))
        .merge(admin_only)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Not found")),
    )
}
