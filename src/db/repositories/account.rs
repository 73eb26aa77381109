use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tokio::task;

use crate::config::SecurityConfig;
use crate::domain::{Identity, Role};
use crate::entities::accounts;

/// Account data returned from the repository (without the password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<accounts::Model> for Account {
    type Error = crate::domain::UnknownVariant;

    fn try_from(model: accounts::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: model.role.parse()?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<Account> for Identity {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
        }
    }
}

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query account by username")?;

        Ok(account.map(Account::try_from).transpose()?)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Account>> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query account by email")?;

        Ok(account.map(Account::try_from).transpose()?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Account>> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query account by ID")?;

        Ok(account.map(Account::try_from).transpose()?)
    }

    /// Oldest account holding the admin role, if any
    pub async fn first_admin(&self) -> Result<Option<Account>> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Role.eq(Role::Admin.as_str()))
            .order_by_asc(accounts::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query admin account")?;

        Ok(account.map(Account::try_from).transpose()?)
    }

    pub async fn count_by_role(&self, role: Role) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        accounts::Entity::find()
            .filter(accounts::Column::Role.eq(role.as_str()))
            .count(&self.conn)
            .await
            .context("Failed to count accounts")
    }

    /// Insert a new account. Uniqueness is the caller's concern; the unique
    /// indexes only catch what slips through.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
        config: &SecurityConfig,
    ) -> Result<Account> {
        let password = password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let now = chrono::Utc::now().to_rfc3339();

        let model = accounts::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert account")?;

        Ok(Account::try_from(model)?)
    }

    /// Verify a password and return the account when it matches.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query account for password verification")?;

        let Some(account) = account else {
            return Ok(None);
        };

        let password_hash = account.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .context("Password verification task panicked")??;

        if is_valid {
            Ok(Some(Account::try_from(account)?))
        } else {
            Ok(None)
        }
    }

    /// Update password for an account (hashes the new password)
    pub async fn update_password(
        &self,
        username: &str,
        new_password: &str,
        config: &SecurityConfig,
    ) -> Result<()> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query account for password update")?
            .ok_or_else(|| anyhow::anyhow!("Account not found: {username}"))?;

        let password = new_password.to_string();
        let config = config.clone();
        let new_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let now = chrono::Utc::now().to_rfc3339();

        let mut active: accounts::ActiveModel = account.into();
        active.password_hash = Set(new_hash);
        active.updated_at = Set(now);
        active.update(&self.conn).await?;

        Ok(())
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the argon2 crate defaults.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash string.
/// The hash carries its own params, so any config it was made with verifies.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    #[test]
    fn hash_is_salted_and_verifies() {
        let config = fast_config();
        let first = hash_password("Kaju", Some(&config)).unwrap();
        let second = hash_password("Kaju", Some(&config)).unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("Kaju"));
        assert!(verify_password("Kaju", &first).unwrap());
        assert!(verify_password("Kaju", &second).unwrap());
        assert!(!verify_password("wrong", &first).unwrap());
    }

    #[test]
    fn default_params_hash_verifies() {
        let hash = hash_password("password123", None).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("password123", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-hash").is_err());
    }
}
