use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::context::{FlashCategory, RequestContext};
use super::observability::RequestSpan;
use super::validation::{passwords_match, require};
use super::{ApiError, ApiJson, ApiResponse, AppState, MessageResponse};
use crate::domain::{Identity, ValidationError};
use crate::services::AccountError;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub auth_source: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user_id: i32,
    pub username: String,
    pub email: String,
}

/// Checked signup fields, shared by the page and API routes.
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<Registration<'_>, ValidationError> {
        let username = require("username", self.username.as_deref())?;
        let email = require("email", self.email.as_deref())?;
        let password = require("password", self.password.as_deref())?;
        let confirm = require("confirm_password", self.confirm_password.as_deref())?;
        passwords_match(password, confirm)?;

        Ok(Registration {
            username,
            email,
            password,
        })
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateUsername | AccountError::DuplicateEmail => {
                Self::validation(err.to_string())
            }
            AccountError::InvalidCredentials => Self::unauthorized(err.to_string()),
            AccountError::NotFound(_) => Self::NotFound(err.to_string()),
            AccountError::Database(msg) => Self::DatabaseError(msg),
            AccountError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

const LOGIN_REQUIRED: &str = "Please log in to access this page.";
const ADMIN_REQUIRED: &str = "You need to be logged in as an admin to access this page.";

/// Page guard: anonymous visitors are sent to `/login` with a flash.
pub async fn require_login_page(ctx: RequestContext, request: Request, next: Next) -> Response {
    match ctx.identity().await {
        Ok(Some(identity)) => {
            record_user(&request, &identity);
            next.run(request).await
        }
        Ok(None) => redirect_to_login(&ctx, LOGIN_REQUIRED, FlashCategory::Info).await,
        Err(e) => e.into_response(),
    }
}

/// Page guard for admin-only pages.
pub async fn require_admin_page(ctx: RequestContext, request: Request, next: Next) -> Response {
    match ctx.identity().await {
        Ok(Some(identity)) if identity.is_admin() => {
            record_user(&request, &identity);
            next.run(request).await
        }
        Ok(_) => redirect_to_login(&ctx, ADMIN_REQUIRED, FlashCategory::Error).await,
        Err(e) => e.into_response(),
    }
}

/// API guard for admin-only endpoints. Answers 401 instead of redirecting.
pub async fn require_admin_api(
    ctx: RequestContext,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match ctx.identity().await? {
        Some(identity) if identity.is_admin() => {
            record_user(&request, &identity);
            Ok(next.run(request).await)
        }
        _ => Err(ApiError::unauthorized("Admin access required")),
    }
}

fn record_user(request: &Request, identity: &Identity) {
    RequestSpan::of(request).record("user_id", identity.id);
}

async fn redirect_to_login(ctx: &RequestContext, message: &str, category: FlashCategory) -> Response {
    if let Err(e) = ctx.flash("login", message, category).await {
        return e.into_response();
    }
    Redirect::to("/login").into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/login
/// Authenticate with username and password and attach the identity to the session
pub async fn login(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let identity = state
        .accounts()
        .authenticate(&username, &password)
        .await
        .inspect_err(|e| {
            if matches!(e, AccountError::InvalidCredentials) {
                tracing::debug!(%username, "API login failed");
            }
        })?;

    ctx.sign_in(&identity).await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        user_id: identity.id,
        is_admin: identity.is_admin(),
        username: identity.username,
        email: identity.email,
        auth_source: "session",
    })))
}

/// POST /api/logout
pub async fn logout(ctx: RequestContext) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    ctx.sign_out().await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// POST /api/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let registration = payload.validate()?;

    let account = state
        .accounts()
        .signup(
            registration.username,
            registration.email,
            registration.password,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SignupResponse {
            message: "Signup successful",
            user_id: account.id,
            username: account.username,
            email: account.email,
        })),
    ))
}
