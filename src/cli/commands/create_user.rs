use crate::config::Config;
use crate::services::UserOutcome;
use crate::state::SharedState;

pub async fn cmd_create_user(
    config: &Config,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    match state
        .account_service
        .create_or_reset_user(username, email, password)
        .await?
    {
        UserOutcome::Created(account) => {
            println!("Created user '{}' (id {})", account.username, account.id);
        }
        UserOutcome::PasswordReset(account) => {
            println!("Reset password for '{}'", account.username);
        }
    }

    Ok(())
}
