//! Admin bootstrap command handler

use crate::config::{BootstrapConfig, Config};
use crate::services::BootstrapOutcome;
use crate::state::SharedState;

/// Flags given on the command line win over the `[bootstrap]` section.
#[must_use]
pub fn merge_bootstrap(
    base: &BootstrapConfig,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    no_reset: bool,
) -> BootstrapConfig {
    BootstrapConfig {
        admin_username: username.unwrap_or_else(|| base.admin_username.clone()),
        admin_email: email.unwrap_or_else(|| base.admin_email.clone()),
        admin_password: password.unwrap_or_else(|| base.admin_password.clone()),
        reset_admin_password: base.reset_admin_password && !no_reset,
    }
}

pub async fn cmd_bootstrap(
    config: &Config,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    no_reset: bool,
) -> anyhow::Result<()> {
    let bootstrap = merge_bootstrap(&config.bootstrap, username, email, password, no_reset);
    if bootstrap.admin_username.trim().is_empty() || bootstrap.admin_password.is_empty() {
        anyhow::bail!("Admin username and password cannot be empty");
    }

    let state = SharedState::new(config.clone()).await?;

    match state.account_service.bootstrap_admin(&bootstrap).await? {
        BootstrapOutcome::Created(account) => {
            println!("Created admin '{}' (id {})", account.username, account.id);
        }
        BootstrapOutcome::PasswordReset(account) => {
            println!("Reset password for admin '{}'", account.username);
        }
        BootstrapOutcome::Unchanged(account) => {
            println!("Admin '{}' already exists, nothing to do", account.username);
        }
    }

    Ok(())
}
