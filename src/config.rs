//! Server configuration, read from the environment (and `.env` via `dotenv` in `main`).

use crate::model::{PromoCode, PromoParseError};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error(transparent)]
    Promo(#[from] PromoParseError),
}

/// Marketplace server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (env: HTTP_HOST)
    pub http_host: String,
    /// HTTP port (env: HTTP_PORT)
    pub http_port: u16,
    /// Idle carts are dropped after this long (env: CART_RETENTION_DAYS)
    pub cart_retention: Duration,
    /// How often idle carts are swept (env: EVICTION_INTERVAL_SECS)
    pub eviction_interval: Duration,
    /// Request channel capacity of each actor (env: ACTOR_BUFFER)
    pub actor_buffer: usize,
    /// JSON file with accounts and meals to load at start-up (env: CATALOG_SEED)
    pub catalog_seed: Option<PathBuf>,
    /// Extra promo codes, `CODE:PERCENT:YYYY-MM-DD` comma list (env: PROMO_CODES)
    pub promo_codes: Vec<PromoCode>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".into(),
            http_port: 5000,
            cart_retention: Duration::from_secs(7 * SECONDS_PER_DAY),
            eviction_interval: Duration::from_secs(3600),
            actor_buffer: 32,
            catalog_seed: None,
            promo_codes: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any key lookup. Unset or empty keys take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let retention_days: u64 = parse_positive(&get, "CART_RETENTION_DAYS")?
            .unwrap_or(defaults.cart_retention.as_secs() / SECONDS_PER_DAY);
        let retention_secs = retention_days
            .checked_mul(SECONDS_PER_DAY)
            .ok_or_else(|| ConfigError::Invalid {
                name: "CART_RETENTION_DAYS",
                reason: format!("{retention_days} days does not fit in a duration"),
            })?;
        let eviction_secs: u64 = parse_positive(&get, "EVICTION_INTERVAL_SECS")?
            .unwrap_or(defaults.eviction_interval.as_secs());

        let promo_codes = match get("PROMO_CODES") {
            Some(list) => list
                .split(',')
                .filter(|entry| !entry.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<PromoCode>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            http_host: get("HTTP_HOST").unwrap_or(defaults.http_host),
            http_port: parse_positive(&get, "HTTP_PORT")?.unwrap_or(defaults.http_port),
            cart_retention: Duration::from_secs(retention_secs),
            eviction_interval: Duration::from_secs(eviction_secs),
            actor_buffer: parse_positive(&get, "ACTOR_BUFFER")?.unwrap_or(defaults.actor_buffer),
            catalog_seed: get("CATALOG_SEED").map(PathBuf::from),
            promo_codes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn parse_positive<T>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = get(name) else {
        return Ok(None);
    };
    match raw.parse::<T>() {
        Ok(value) if value > T::default() => Ok(Some(value)),
        _ => Err(ConfigError::Invalid {
            name,
            reason: format!("expected a positive number, got '{raw}'"),
        }),
    }
}
