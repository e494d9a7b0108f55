// Password hashing and verification (bcrypt)

use bcrypt::{hash, verify, DEFAULT_COST};

use super::{AuthError, AuthResult};

/// Bcrypt cost used when the caller does not pick one.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Hash a password with a fresh salt.
///
/// Runs on the blocking thread pool since bcrypt is CPU-bound.
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// `Ok(false)` means the password does not match; `Err` means the hash itself
/// could not be used (malformed, unsupported version).
pub async fn verify_password(password: &str, hashed_password: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hashed_password = hashed_password.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hashed_password).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn test_hash_then_verify_round_trip() {
        let hashed = hash_password("newpassword", Some(TEST_COST)).await.unwrap();
        assert!(verify_password("newpassword", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_incorrect_password() {
        let hashed = hash_password("password", Some(TEST_COST)).await.unwrap();
        assert!(!verify_password("wrongpassword", &hashed).await.unwrap());
        assert!(!verify_password("", &hashed).await.unwrap());
        assert!(!verify_password("Password", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let first = hash_password("password", Some(TEST_COST)).await.unwrap();
        let second = hash_password("password", Some(TEST_COST)).await.unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let result = verify_password("password", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(AuthError::Hashing(_))));
    }
}
