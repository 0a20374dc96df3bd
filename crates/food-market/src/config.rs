//! Environment-driven settings, read once at startup.
use std::{fmt::Display, fs::read_to_string, net::IpAddr, str::FromStr, time::Duration};

use crate::auth::{DEFAULT_PASSWORD_COST, MAX_PASSWORD_COST, MIN_PASSWORD_COST};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

const THIRTY_DAYS_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: String, reason: String },

    #[error("Failed to read secret from {path}: {source}")]
    Secret {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Whether one email may back accounts of different roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailNamespace {
    /// One email, one account, whatever the role.
    #[default]
    Shared,
    /// The same email may register once per role.
    PerRole,
}

impl FromStr for EmailNamespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared" => Ok(EmailNamespace::Shared),
            "per-role" => Ok(EmailNamespace::PerRole),
            other => Err(format!("expected `shared` or `per-role`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    pub session_secret: String,
    pub session_ttl: Duration,
    pub email_namespace: EmailNamespace,
    pub actor_buffer: usize,
    /// bcrypt work factor for stored passwords.
    pub password_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            session_secret: random_secret(),
            session_ttl: Duration::from_secs(THIRTY_DAYS_SECS),
            email_namespace: EmailNamespace::Shared,
            actor_buffer: 32,
            password_cost: DEFAULT_PASSWORD_COST,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let actor_buffer: usize = try_load(&lookup, "ACTOR_BUFFER", "32")?;
        if actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "ACTOR_BUFFER".into(),
                reason: "must be greater than zero".into(),
            });
        }

        let password_cost: u32 =
            try_load(&lookup, "PASSWORD_COST", &DEFAULT_PASSWORD_COST.to_string())?;
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&password_cost) {
            warn!("Invalid PASSWORD_COST value: {password_cost}");
            return Err(ConfigError::Invalid {
                key: "PASSWORD_COST".into(),
                reason: format!("must be between {MIN_PASSWORD_COST} and {MAX_PASSWORD_COST}"),
            });
        }

        Ok(Self {
            port: try_load(&lookup, "RUST_PORT", "5000")?,
            bind_addr: try_load(&lookup, "BIND_ADDR", "0.0.0.0")?,
            session_secret: session_secret(&lookup)?,
            session_ttl: Duration::from_secs(try_load(
                &lookup,
                "SESSION_TTL_SECS",
                &THIRTY_DAYS_SECS.to_string(),
            )?),
            email_namespace: try_load(&lookup, "EMAIL_NAMESPACE", "shared")?,
            actor_buffer,
            password_cost,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
}

fn session_secret(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    if let Some(secret) = lookup("SESSION_SECRET").filter(|s| !s.trim().is_empty()) {
        return Ok(secret);
    }
    if let Some(path) = lookup("SESSION_SECRET_FILE") {
        return read_secret(&path);
    }
    warn!("SESSION_SECRET not set, sessions will not survive a restart");
    Ok(random_secret())
}

fn read_secret(path: &str) -> Result<String, ConfigError> {
    read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|source| {
            warn!("Failed to read session secret from {path}: {source}");
            ConfigError::Secret {
                path: path.to_string(),
                source,
            }
        })
}

fn random_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_addr, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.session_ttl, Duration::from_secs(THIRTY_DAYS_SECS));
        assert_eq!(config.email_namespace, EmailNamespace::Shared);
        assert_eq!(config.actor_buffer, 32);
        assert_eq!(config.session_secret.len(), 64);
        assert_eq!(config.password_cost, DEFAULT_PASSWORD_COST);
    }

    #[test]
    fn values_are_read_from_the_lookup() {
        let config = Config::from_lookup(lookup(&[
            ("RUST_PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("SESSION_SECRET", "s3cret"),
            ("SESSION_TTL_SECS", "60"),
            ("EMAIL_NAMESPACE", "per-role"),
            ("ACTOR_BUFFER", "8"),
            ("PASSWORD_COST", "12"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.session_secret, "s3cret");
        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert_eq!(config.email_namespace, EmailNamespace::PerRole);
        assert_eq!(config.actor_buffer, 8);
        assert_eq!(config.password_cost, 12);
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = Config::from_lookup(lookup(&[("RUST_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "RUST_PORT"));

        let err = Config::from_lookup(lookup(&[("EMAIL_NAMESPACE", "global")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "EMAIL_NAMESPACE"));

        let err = Config::from_lookup(lookup(&[("ACTOR_BUFFER", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "ACTOR_BUFFER"));

        for cost in ["3", "32"] {
            let err = Config::from_lookup(lookup(&[("PASSWORD_COST", cost)])).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "PASSWORD_COST"));
        }
    }

    #[test]
    fn missing_secret_file_is_an_error() {
        let err = Config::from_lookup(lookup(&[(
            "SESSION_SECRET_FILE",
            "/nonexistent/food-market/session_secret",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Secret { .. }));
    }

    #[test]
    fn each_process_gets_a_distinct_random_secret() {
        assert_ne!(random_secret(), random_secret());
    }
}
