use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::password::verify_password;
use super::{AuthError, AuthResult, Credentials, TokenCodec};
use crate::config::AppConfig;

/// Body returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Login and token verification against the single configured identity.
///
/// Holds only immutable state, so one instance is shared by every request.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Credentials,
    codec: TokenCodec,
}

impl Authenticator {
    pub fn new(credentials: Credentials, codec: TokenCodec) -> Self {
        Self { credentials, codec }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.credentials.clone(),
            TokenCodec::from_config(&config.security),
        )
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Check a username/password pair.
    ///
    /// Every mismatch yields the same `Unauthenticated` error so callers
    /// cannot tell an unknown user from a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> AuthResult<&Credentials> {
        if username != self.credentials.username {
            tracing::warn!("Login rejected: unknown username");
            return Err(AuthError::Unauthenticated);
        }

        match verify_password(password, &self.credentials.hashed_password).await {
            Ok(true) => Ok(&self.credentials),
            Ok(false) => {
                tracing::warn!("Login rejected: password mismatch");
                Err(AuthError::Unauthenticated)
            }
            Err(e) => {
                tracing::error!("Stored password hash could not be verified: {}", e);
                Err(AuthError::Unauthenticated)
            }
        }
    }

    /// Authenticate and, on success, issue a bearer token for the username.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ttl: Option<Duration>,
    ) -> AuthResult<AccessToken> {
        let credentials = self.authenticate(username, password).await?;
        let token = self.codec.issue(&credentials.username, ttl)?;
        tracing::info!("Issued access token for {}", credentials.username);
        Ok(AccessToken::bearer(token))
    }

    /// Verify a bearer token and return its subject.
    ///
    /// Tokens signed for any subject other than the configured username are
    /// rejected even when the signature is valid.
    pub fn authorize(&self, token: &str) -> AuthResult<String> {
        let subject = self.codec.verify(token)?;
        if subject != self.credentials.username {
            return Err(AuthError::InvalidToken(format!(
                "subject '{}' is not the configured user",
                subject
            )));
        }
        Ok(subject)
    }
}
