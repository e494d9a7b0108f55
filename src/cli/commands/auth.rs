use anyhow::Context;
use chrono::Duration;

use crate::auth::Authenticator;
use crate::cli::{utils::output, OutputFormat};
use crate::config::AppConfig;

/// Run the login flow locally against the configured credentials.
pub async fn token(
    username: &str,
    password: &str,
    minutes: Option<i64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let minutes = minutes.unwrap_or(config.security.access_token_expire_minutes);
    if minutes <= 0 {
        anyhow::bail!("token lifetime must be positive");
    }

    let authenticator = Authenticator::from_config(&config);
    let token = authenticator
        .login(username, password, Some(Duration::minutes(minutes)))
        .await?;

    output(output_format, &token, || token.access_token.clone())
}
