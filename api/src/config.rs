use std::env;

use thiserror::Error;

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    /// Lifetime of issued tokens and of the session cookie.
    pub token_ttl_hours: i64,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
    pub max_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults for everything but the secret.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: 24 * 7,
            cookie_secure: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_concurrency: 1024,
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let mut config = Self::with_secret(jwt_secret);

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(value) = lookup("TOKEN_TTL_HOURS") {
            config.token_ttl_hours = parse("TOKEN_TTL_HOURS", value)?;
        }
        if let Some(value) = lookup("COOKIE_SECURE") {
            config.cookie_secure = parse("COOKIE_SECURE", value)?;
        }
        if let Some(value) = lookup("BCRYPT_COST") {
            config.bcrypt_cost = parse("BCRYPT_COST", value)?;
        }
        if let Some(value) = lookup("MAX_CONCURRENCY") {
            config.max_concurrency = parse("MAX_CONCURRENCY", value)?;
        }

        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&config.token_ttl_hours) {
            return Err(ConfigError::Invalid {
                name: "TOKEN_TTL_HOURS",
                value: config.token_ttl_hours.to_string(),
            });
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
