//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::{BootstrapConfig, SecurityConfig};
use crate::db::{Account, Store};
use crate::domain::{Identity, Role};
use crate::services::account_service::{
    AccountError, AccountService, BootstrapOutcome, UserOutcome,
};

pub struct SeaOrmAccountService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    /// Check-then-insert. The unique indexes reject whatever races past the
    /// checks, which surfaces as an internal error.
    async fn create_checked(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, AccountError> {
        if self.store.get_account_by_username(username).await?.is_some() {
            return Err(AccountError::DuplicateUsername);
        }

        if self.store.get_account_by_email(email).await?.is_some() {
            return Err(AccountError::DuplicateEmail);
        }

        let account = self
            .store
            .create_account(username, email, password, role, &self.security)
            .await?;

        Ok(account)
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let account = self
            .create_checked(username, email, password, Role::User)
            .await?;

        info!(account_id = account.id, username = %account.username, "User registered");
        Ok(account)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AccountError> {
        let account = self
            .store
            .verify_account_password(username, password)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        Ok(account.into())
    }

    async fn reset_password(&self, username: &str, password: &str) -> Result<(), AccountError> {
        if self.store.get_account_by_username(username).await?.is_none() {
            return Err(AccountError::NotFound(username.to_string()));
        }

        self.store
            .update_account_password(username, password, &self.security)
            .await?;

        Ok(())
    }

    async fn bootstrap_admin(
        &self,
        bootstrap: &BootstrapConfig,
    ) -> Result<BootstrapOutcome, AccountError> {
        if let Some(admin) = self.store.first_admin().await? {
            if !bootstrap.reset_admin_password {
                return Ok(BootstrapOutcome::Unchanged(admin));
            }

            self.store
                .update_account_password(&admin.username, &bootstrap.admin_password, &self.security)
                .await?;

            info!(username = %admin.username, "Admin password reset");
            return Ok(BootstrapOutcome::PasswordReset(admin));
        }

        let admin = self
            .create_checked(
                &bootstrap.admin_username,
                &bootstrap.admin_email,
                &bootstrap.admin_password,
                Role::Admin,
            )
            .await?;

        info!(username = %admin.username, "Admin account created");
        Ok(BootstrapOutcome::Created(admin))
    }

    async fn create_or_reset_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserOutcome, AccountError> {
        if let Some(existing) = self.store.get_account_by_username(username).await? {
            self.store
                .update_account_password(username, password, &self.security)
                .await?;
            return Ok(UserOutcome::PasswordReset(existing));
        }

        let account = self
            .create_checked(username, email, password, Role::User)
            .await?;

        Ok(UserOutcome::Created(account))
    }

    async fn admin_exists(&self) -> Result<bool, AccountError> {
        Ok(self.store.count_accounts(Role::Admin).await? > 0)
    }
}
