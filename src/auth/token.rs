use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{AuthError, AuthResult};
use crate::config::SecurityConfig;

/// Lifetime applied by `TokenCodec::issue` when the caller gives none.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

/// JWT claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the authenticated username)
    pub sub: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
}

impl Claims {
    pub fn new(subject: impl Into<String>, ttl: Option<Duration>) -> Self {
        let now = Utc::now();
        let ttl = ttl.unwrap_or_else(|| Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES));

        Self {
            sub: subject.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Signs and verifies stateless access tokens with a symmetric key.
///
/// Changing the key or the algorithm invalidates every token issued before.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(&config.secret_key, config.algorithm)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Issue a token for `subject` that expires `ttl` from now (15 minutes if `None`).
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> AuthResult<String> {
        self.sign(&Claims::new(subject, ttl))
    }

    /// Sign an explicit set of claims.
    pub fn sign(&self, claims: &Claims) -> AuthResult<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Verify signature and expiry, returning the full claims.
    pub fn decode(&self, token: &str) -> AuthResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("token has an empty subject".to_string()));
        }

        Ok(data.claims)
    }

    /// Verify signature and expiry, returning the token's subject.
    pub fn verify(&self, token: &str) -> AuthResult<String> {
        Ok(self.decode(token)?.sub)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SUBJECT: &str = "testuser@awesomeinc.com";

    fn codec() -> TokenCodec {
        TokenCodec::new("your_secret_key", Algorithm::HS256)
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let codec = codec();
        let token = codec.issue(SUBJECT, None).unwrap();
        assert_eq!(codec.verify(&token).unwrap(), SUBJECT);

        let token = codec.issue(SUBJECT, Some(Duration::minutes(5))).unwrap();
        assert_eq!(codec.verify(&token).unwrap(), SUBJECT);
    }

    #[test]
    fn test_default_ttl_is_fifteen_minutes() {
        let claims = Claims::new(SUBJECT, None);
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_MINUTES * 60);

        let claims = Claims::new(SUBJECT, Some(Duration::minutes(30)));
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_token_carries_exp_claim() {
        let codec = codec();
        let token = codec.issue(SUBJECT, Some(Duration::minutes(5))).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        let raw = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"your_secret_key"),
            &validation,
        )
        .unwrap();
        assert!(raw.claims.get("exp").is_some());
        assert_eq!(raw.claims["sub"], SUBJECT);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: SUBJECT.to_string(),
            exp: now - 1,
            iat: now - 60,
        };
        let token = codec.sign(&claims).unwrap();
        assert!(matches!(codec.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_token_valid_until_expiry_instant() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: SUBJECT.to_string(),
            exp: now + 2,
            iat: now,
        };
        let token = codec.sign(&claims).unwrap();
        assert_eq!(codec.verify(&token).unwrap(), SUBJECT);
    }

    #[test]
    fn test_any_altered_byte_is_rejected() {
        let codec = codec();
        let token = codec.issue(SUBJECT, None).unwrap();

        for (index, original) in token.char_indices() {
            if original == '.' {
                continue;
            }
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(index..index + 1, &replacement.to_string());
            assert!(
                codec.verify(&tampered).is_err(),
                "tampered token at byte {index} was accepted"
            );
        }
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let token = codec().issue(SUBJECT, None).unwrap();
        let other = TokenCodec::new("another_secret_key", Algorithm::HS256);
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_wrong_algorithm_is_rejected() {
        let token = codec().issue(SUBJECT, None).unwrap();
        let other = TokenCodec::new("your_secret_key", Algorithm::HS512);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let codec = codec();
        let payload = json!({ "exp": Utc::now().timestamp() + 600 });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(b"your_secret_key"),
        )
        .unwrap();
        assert!(matches!(codec.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let codec = codec();
        assert!(codec.verify("invalidtoken").is_err());
        assert!(codec.verify("").is_err());
        assert!(codec.verify("a.b.c").is_err());
    }
}
