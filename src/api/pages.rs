//! Form-driven page routes.
//!
//! POST handlers never surface raw errors: every outcome becomes a flash on
//! the target page followed by a redirect. GET handlers answer with a JSON
//! page view carrying that page's drained flashes.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Redirect,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{error, warn};

use super::auth::{LoginRequest, SignupRequest};
use super::contact::ContactRequest;
use super::context::{FlashCategory, FlashMessage, RequestContext};
use super::pet_bookings::PetBookingRequest;
use super::validation::{parse_date, parse_persons, parse_time, require};
use super::{ApiError, AppState};
use crate::domain::{ValidationError, ValidationReason};
use crate::models::appointment::AppointmentInput;
use crate::models::message::Message;
use crate::services::{AccountError, AppointmentError};

const SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again.";

#[derive(Debug, Serialize)]
pub struct PageView {
    pub page: &'static str,
    pub flashes: Vec<FlashMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

impl PageView {
    async fn load(ctx: &RequestContext, page: &'static str) -> Result<Self, ApiError> {
        let flashes = ctx.take_flashes(page).await?;
        let username = ctx.identity().await?.map(|identity| identity.username);

        Ok(Self {
            page,
            flashes,
            username,
            today: None,
            messages: None,
        })
    }
}

/// Appointment form as posted by the page. Dates are canonical only.
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub persons: Option<String>,
}

impl AppointmentForm {
    pub fn validate(&self) -> Result<AppointmentInput, ValidationError> {
        let name = require("name", self.name.as_deref())?;
        let email = require("email", self.email.as_deref())?;
        let phone = require("phone", self.phone.as_deref())?;
        let date = require("date", self.date.as_deref())?;
        let time = require("time", self.time.as_deref())?;
        let persons = require("persons", self.persons.as_deref())?;

        Ok(AppointmentInput {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            date: parse_date("date", date)?,
            time: parse_time("time", time)?,
            persons: parse_persons(persons)?,
        })
    }
}

/// A form that fails to decode is treated as an empty one.
fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(value)) => value,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected form body");
            T::default()
        }
    }
}

fn log_failure(action: &str, err: &impl Display) {
    error!(error = %err, "{action} failed");
}

async fn flash_and_redirect(
    ctx: &RequestContext,
    page: &str,
    message: impl Into<String>,
    category: FlashCategory,
    to: &str,
) -> Result<Redirect, ApiError> {
    ctx.flash(page, message, category).await?;
    Ok(Redirect::to(to))
}

// ============================================================================
// Views
// ============================================================================

/// GET /
pub async fn index(ctx: RequestContext) -> Result<Json<PageView>, ApiError> {
    Ok(Json(PageView::load(&ctx, "index").await?))
}

/// GET /login
pub async fn login_page(ctx: RequestContext) -> Result<Json<PageView>, ApiError> {
    Ok(Json(PageView::load(&ctx, "login").await?))
}

/// GET /signup
pub async fn signup_page(ctx: RequestContext) -> Result<Json<PageView>, ApiError> {
    Ok(Json(PageView::load(&ctx, "signup").await?))
}

/// GET /admin_dashboard
pub async fn admin_dashboard(ctx: RequestContext) -> Result<Json<PageView>, ApiError> {
    Ok(Json(PageView::load(&ctx, "admin_dashboard").await?))
}

/// GET /contact
pub async fn contact_page(ctx: RequestContext) -> Result<Json<PageView>, ApiError> {
    Ok(Json(PageView::load(&ctx, "contact").await?))
}

/// GET /appointment
pub async fn appointment_page(ctx: RequestContext) -> Result<Json<PageView>, ApiError> {
    let mut view = PageView::load(&ctx, "appointment").await?;
    view.today = Some(chrono::Local::now().format("%Y-%m-%d").to_string());
    Ok(Json(view))
}

/// GET /booking
pub async fn booking_page(ctx: RequestContext) -> Result<Json<PageView>, ApiError> {
    Ok(Json(PageView::load(&ctx, "booking").await?))
}

/// GET /messages
pub async fn messages_page(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<Json<PageView>, ApiError> {
    let mut view = PageView::load(&ctx, "messages").await?;
    view.messages = Some(state.messages().list().await?);
    Ok(Json(view))
}

// ============================================================================
// Form actions
// ============================================================================

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    form: Result<Form<LoginRequest>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let form = form_or_default(form);
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match state.accounts().authenticate(&username, &password).await {
        Ok(identity) => {
            ctx.sign_in(&identity).await?;
            if identity.is_admin() {
                Ok(Redirect::to("/admin_dashboard"))
            } else {
                Ok(Redirect::to("/"))
            }
        }
        Err(AccountError::InvalidCredentials) => {
            tracing::debug!(%username, "Login failed");
            flash_and_redirect(
                &ctx,
                "login",
                "Invalid username or password",
                FlashCategory::Danger,
                "/login",
            )
            .await
        }
        Err(e) => {
            log_failure("Login", &e);
            flash_and_redirect(&ctx, "login", SOMETHING_WENT_WRONG, FlashCategory::Danger, "/login")
                .await
        }
    }
}

/// POST /signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    form: Result<Form<SignupRequest>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let form = form_or_default(form);

    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(e) => {
            return flash_and_redirect(&ctx, "signup", e.to_string(), FlashCategory::Danger, "/signup")
                .await;
        }
    };

    match state
        .accounts()
        .signup(
            registration.username,
            registration.email,
            registration.password,
        )
        .await
    {
        Ok(_) => {
            flash_and_redirect(
                &ctx,
                "login",
                "Registration successful",
                FlashCategory::Success,
                "/login",
            )
            .await
        }
        Err(e @ (AccountError::DuplicateUsername | AccountError::DuplicateEmail)) => {
            flash_and_redirect(&ctx, "signup", e.to_string(), FlashCategory::Danger, "/signup")
                .await
        }
        Err(e) => {
            log_failure("Signup", &e);
            flash_and_redirect(&ctx, "signup", SOMETHING_WENT_WRONG, FlashCategory::Danger, "/signup")
                .await
        }
    }
}

/// GET /logout
pub async fn logout(ctx: RequestContext) -> Result<Redirect, ApiError> {
    ctx.sign_out().await?;
    Ok(Redirect::to("/login"))
}

/// POST /send_message
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    form: Result<Form<ContactRequest>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let input = match form_or_default(form).validate() {
        Ok(input) => input,
        Err(e) => {
            return flash_and_redirect(&ctx, "contact", e.to_string(), FlashCategory::Error, "/contact")
                .await;
        }
    };

    match state.messages().send(&input).await {
        Ok(_) => {
            flash_and_redirect(
                &ctx,
                "contact",
                "Your message has been sent successfully!",
                FlashCategory::Success,
                "/contact",
            )
            .await
        }
        Err(e) => {
            log_failure("Saving message", &e);
            flash_and_redirect(
                &ctx,
                "contact",
                "An error occurred while sending your message. Please try again.",
                FlashCategory::Error,
                "/contact",
            )
            .await
        }
    }
}

/// POST /book_appointment
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    form: Result<Form<AppointmentForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let input = match form_or_default(form).validate() {
        Ok(input) => input,
        Err(e) => return appointment_rejected(&ctx, &e).await,
    };

    match state.appointments().book(&input).await {
        Ok(_) => {
            flash_and_redirect(
                &ctx,
                "appointment",
                "Appointment booked successfully!",
                FlashCategory::Success,
                "/appointment",
            )
            .await
        }
        Err(AppointmentError::Invalid(e)) => appointment_rejected(&ctx, &e).await,
        Err(e) => {
            log_failure("Booking appointment", &e);
            flash_and_redirect(
                &ctx,
                "appointment",
                SOMETHING_WENT_WRONG,
                FlashCategory::Danger,
                "/appointment",
            )
            .await
        }
    }
}

async fn appointment_rejected(
    ctx: &RequestContext,
    err: &ValidationError,
) -> Result<Redirect, ApiError> {
    let message = match err.reason {
        ValidationReason::InvalidDate | ValidationReason::InvalidTime => {
            "Invalid date or time format. Please use the date and time pickers provided."
                .to_string()
        }
        _ => err.to_string(),
    };
    flash_and_redirect(ctx, "appointment", message, FlashCategory::Danger, "/appointment").await
}

/// POST /book_pet
/// The signed-in account owns the booking
pub async fn book_pet(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    form: Result<Form<PetBookingRequest>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let input = match form_or_default(form).validate() {
        Ok(input) => input,
        Err(e) => {
            return flash_and_redirect(&ctx, "booking", e.to_string(), FlashCategory::Error, "/booking")
                .await;
        }
    };

    let owner = ctx.identity().await?.map(|identity| identity.id);

    match state.pet_bookings().book(&input, owner).await {
        Ok(_) => {
            flash_and_redirect(
                &ctx,
                "booking",
                "Pet booked successfully! We will contact you soon.",
                FlashCategory::Success,
                "/booking",
            )
            .await
        }
        Err(e) => {
            log_failure("Booking pet", &e);
            flash_and_redirect(&ctx, "booking", SOMETHING_WENT_WRONG, FlashCategory::Error, "/booking")
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(date: &str, time: &str, persons: &str) -> AppointmentForm {
        AppointmentForm {
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: Some("555-0101".to_string()),
            date: Some(date.to_string()),
            time: Some(time.to_string()),
            persons: Some(persons.to_string()),
        }
    }

    #[test]
    fn page_form_wants_canonical_dates() {
        assert!(form("2025-07-15", "10:00", "2").validate().is_ok());
        assert_eq!(
            form("15-07-2025", "10:00", "2").validate().unwrap_err().reason,
            ValidationReason::InvalidDate
        );
    }

    #[test]
    fn page_form_checks_persons() {
        assert_eq!(
            form("2025-07-15", "10:00", "0").validate().unwrap_err().reason,
            ValidationReason::InvalidNumber
        );
        assert_eq!(
            form("2025-07-15", "10:00", "").validate().unwrap_err().reason,
            ValidationReason::MissingField
        );
    }
}
