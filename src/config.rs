use std::{env, fmt, str::FromStr};

use actix_web::cookie::Key;

const MIN_SESSION_KEY_LEN: usize = 64;

/// Runtime configuration, read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub cookie_secure: bool,
    pub admin_password: String,
    pub seed_demo: bool,
}

#[derive(Debug)]
pub struct ConfigError {
    pub key: String,
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.key, self.reason)
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: try_load(&lookup, "DATABASE_URL", "sqlite://data/polls.db")?,
            max_connections: try_load(&lookup, "DATABASE_MAX_CONNECTIONS", "8")?,
            bind_addr: try_load(&lookup, "BIND_ADDR", "127.0.0.1:8080")?,
            session_key: lookup("SESSION_KEY"),
            cookie_secure: try_load(&lookup, "COOKIE_SECURE", "false")?,
            admin_password: try_load(&lookup, "ADMIN_PASSWORD", "admin123")?,
            seed_demo: try_load(&lookup, "SEED_DEMO", "true")?,
        })
    }

    /// Cookie signing key. Falls back to a random key, which logs everyone
    /// out on restart.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        log::info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
