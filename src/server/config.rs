use std::time::Duration;

use crate::server::error::config::ConfigError;

const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BACKEND_MAX_ATTEMPTS: u32 = 3;

/// Key used to verify caller identity tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityKey {
    /// PEM-encoded RSA public key, tokens signed with RS256
    RsaPem(String),
    /// Shared secret, tokens signed with HS256
    Secret(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub backend_url: String,
    pub valkey_url: String,
    pub identity_key: IdentityKey,
    pub backend_timeout: Duration,
    pub backend_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let require =
            |var: &str| get(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()));

        let identity_key = match (
            get("IDENTITY_JWT_PUBLIC_KEY"),
            get("IDENTITY_JWT_SECRET"),
        ) {
            (Some(pem), _) => IdentityKey::RsaPem(pem),
            (None, Some(secret)) => IdentityKey::Secret(secret),
            (None, None) => {
                return Err(ConfigError::MissingEnvVar(
                    "IDENTITY_JWT_PUBLIC_KEY or IDENTITY_JWT_SECRET".to_string(),
                ))
            }
        };

        let backend_timeout_secs = match get("BACKEND_TIMEOUT_SECS") {
            Some(raw) => parse_number::<u64>("BACKEND_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_BACKEND_TIMEOUT_SECS,
        };
        if backend_timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "BACKEND_TIMEOUT_SECS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let backend_max_attempts = match get("BACKEND_MAX_ATTEMPTS") {
            Some(raw) => parse_number::<u32>("BACKEND_MAX_ATTEMPTS", &raw)?,
            None => DEFAULT_BACKEND_MAX_ATTEMPTS,
        };
        if backend_max_attempts == 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "BACKEND_MAX_ATTEMPTS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            backend_url: require("BACKEND_URL")?,
            valkey_url: require("VALKEY_URL")?,
            identity_key,
            backend_timeout: Duration::from_secs(backend_timeout_secs),
            backend_max_attempts,
        })
    }
}

fn parse_number<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|err| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: err.to_string(),
        })
}
