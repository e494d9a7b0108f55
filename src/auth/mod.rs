pub mod authenticator;
pub mod credentials;
pub mod password;
pub mod token;

pub use authenticator::{AccessToken, Authenticator};
pub use credentials::Credentials;
pub use token::{Claims, TokenCodec, DEFAULT_TOKEN_TTL_MINUTES};

use thiserror::Error;

/// Failures of the authentication subsystem.
///
/// `Unauthenticated`, `MissingToken` and `InvalidToken` are routine client
/// outcomes and map to 401 at the HTTP boundary. `Hashing` and
/// `TokenGeneration` are server faults.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    Unauthenticated,

    #[error("Not authenticated")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Token generation error: {0}")]
    TokenGeneration(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
