//! Domain service for accounts: signup, login and admin bootstrap.

use thiserror::Error;

use crate::config::BootstrapConfig;
use crate::db::Account;
use crate::domain::Identity;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AccountError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// What `bootstrap_admin` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created(Account),
    PasswordReset(Account),
    Unchanged(Account),
}

/// What `create_or_reset_user` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserOutcome {
    Created(Account),
    PasswordReset(Account),
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Registers a regular user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DuplicateUsername`] or
    /// [`AccountError::DuplicateEmail`] when either is already taken.
    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError>;

    /// Resolves a username and password to an identity.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] for an unknown username or
    /// a wrong password alike.
    async fn authenticate(&self, username: &str, password: &str)
    -> Result<Identity, AccountError>;

    async fn reset_password(&self, username: &str, password: &str) -> Result<(), AccountError>;

    /// Ensures an admin account exists. Safe to run repeatedly.
    async fn bootstrap_admin(
        &self,
        bootstrap: &BootstrapConfig,
    ) -> Result<BootstrapOutcome, AccountError>;

    /// Creates a regular user, or resets the password when the username exists.
    async fn create_or_reset_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserOutcome, AccountError>;

    async fn admin_exists(&self) -> Result<bool, AccountError>;
}
