//! Environment-driven server configuration.

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{debug, warn};

/// Signing keys shorter than this are rejected.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
    #[error("SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes")]
    SessionSecretTooShort,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Mark the admin cookie `Secure` (HTTPS deployments).
    pub session_secure: bool,
    pub session_secret: Option<String>,
    /// Password given to the seeded `admin` account.
    pub admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://resort.db".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            session_secure: false,
            session_secret: None,
            admin_password: "admin123".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to the
    /// defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let session_secret = lookup("SESSION_SECRET").filter(|s| !s.is_empty());
        if session_secret
            .as_ref()
            .is_some_and(|s| s.len() < MIN_SESSION_SECRET_LEN)
        {
            return Err(ConfigError::SessionSecretTooShort);
        }
        if session_secret.is_none() {
            warn!("SESSION_SECRET not set, admin sessions will not survive a restart");
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port)?,
            session_secure: parse_or("SESSION_SECURE", lookup("SESSION_SECURE"), defaults.session_secure)?,
            session_secret,
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        None => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert!(!config.session_secure);
        assert_eq!(config.admin_password, "admin123");
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("HOST", "0.0.0.0"),
            ("SESSION_SECURE", "true"),
            ("DATABASE_URL", "sqlite://data/resort.db"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(config.session_secure);
        assert_eq!(config.database_url, "sqlite://data/resort.db");
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_short_session_secret_is_rejected() {
        let err = Config::from_lookup(lookup(&[("SESSION_SECRET", "too-short")])).unwrap_err();
        assert!(matches!(err, ConfigError::SessionSecretTooShort));

        let long = "k".repeat(MIN_SESSION_SECRET_LEN);
        let config = Config::from_lookup(lookup(&[("SESSION_SECRET", long.as_str())])).unwrap();
        assert_eq!(config.session_secret.as_deref(), Some(long.as_str()));
    }
}
