use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::auth::Credentials;

/// Errors raised while loading configuration at startup. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0} is not set")]
    Missing(&'static str),

    #[error("Invalid configuration: {key}={value} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub dbname: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_PORT: u16 = 8000;

impl AppConfig {
    /// Load the full configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::new(
            required(&lookup, "ADF__USERNAME")?,
            required(&lookup, "HASHED__PASSWORD")?,
        );

        let security = SecurityConfig {
            secret_key: required(&lookup, "SECRET__KEY")?,
            algorithm: algorithm(&lookup)?,
            access_token_expire_minutes: parsed(
                &lookup,
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
            )?,
        };
        if security.access_token_expire_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                value: security.access_token_expire_minutes.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let database = DatabaseConfig::from_lookup(&lookup)?;

        let server = ServerConfig {
            host: lookup("API__HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "API__PORT", DEFAULT_PORT)?,
            enable_cors: parsed(&lookup, "API__ENABLE_CORS", false)?,
        };

        Ok(Self {
            credentials,
            security,
            database,
            server,
        })
    }
}

impl DatabaseConfig {
    /// Database settings only; the CLI uses this for commands that never touch auth.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            hostname: required(&lookup, "DATABASE__HOSTNAME")?,
            port: required_parsed(&lookup, "DATABASE__PORT")?,
            username: required(&lookup, "DATABASE__USERNAME")?,
            password: required(&lookup, "DATABASE__PASSWORD")?,
            dbname: required(&lookup, "DATABASE__DB")?,
            max_connections: parsed(&lookup, "DATABASE__MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn required_parsed<F, T>(lookup: &F, key: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = required(lookup, key)?;
    parse_value(key, value)
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => parse_value(key, value),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(v) => Ok(v),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

// Only HMAC algorithms work with a shared secret key.
fn algorithm<F>(lookup: &F) -> Result<Algorithm, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup("TOKEN__ALGORITHM") else {
        return Ok(Algorithm::HS256);
    };
    match Algorithm::from_str(value.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        Ok(_) => Err(ConfigError::Invalid {
            key: "TOKEN__ALGORITHM",
            value,
            reason: "only HS256, HS384 and HS512 are supported".to_string(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            key: "TOKEN__ALGORITHM",
            reason: e.to_string(),
            value,
        }),
    }
}
