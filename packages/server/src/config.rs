//! Server configuration read from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `BIND_ADDR` | `127.0.0.1` |
//! | `PORT` | `8080` |
//! | `APP_TOKEN` (or `app_token`) | unset |
//! | `SOCRATA_API_URL` | Chicago crimes dataset |
//! | `SOCRATA_LIMIT` | unset |
//! | `REQUEST_TIMEOUT_SECS` | unset |
//! | `TIME_WINDOW_MINUTES` | `120` |
//! | `EXCLUDE_PRIMARY_DESCRIPTIONS` | unset (disabled) |
//!
//! Empty values are treated as unset.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crime_nearby_query::QueryOptions;
use crime_nearby_query_models::CategoryExclusion;
use crime_nearby_source::lookup::LookupOptions;
use crime_nearby_source::socrata::{CHICAGO_CRIMES_API_URL, SocrataConfig};
use crime_nearby_temporal::{DEFAULT_WINDOW_MINUTES, MINUTES_PER_DAY};

/// Error for an environment variable that is set but unusable.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value {value:?} for {key}: {message}")]
pub struct ConfigError {
    /// Variable name.
    pub key: &'static str,
    /// The offending value.
    pub value: String,
    /// Why it was rejected.
    pub message: String,
}

/// Everything the server needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
    /// Data API client settings.
    pub socrata: SocrataConfig,
    /// Query and post-filter settings.
    pub lookup: LookupOptions,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unparseable or
    /// out-of-range value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `get`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unparseable or
    /// out-of-range value.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_var(&get, "PORT")?.unwrap_or(8080);

        let window_minutes = parse_var(&get, "TIME_WINDOW_MINUTES")?.unwrap_or(DEFAULT_WINDOW_MINUTES);
        if window_minutes > MINUTES_PER_DAY / 2 {
            return Err(ConfigError {
                key: "TIME_WINDOW_MINUTES",
                value: window_minutes.to_string(),
                message: format!("must be at most {}", MINUTES_PER_DAY / 2),
            });
        }

        let category_exclusion: CategoryExclusion = get("EXCLUDE_PRIMARY_DESCRIPTIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let socrata = SocrataConfig {
            api_url: get("SOCRATA_API_URL").unwrap_or_else(|| CHICAGO_CRIMES_API_URL.to_string()),
            app_token: get("APP_TOKEN").or_else(|| get("app_token")),
            limit: parse_var(&get, "SOCRATA_LIMIT")?,
            timeout: parse_var::<u64>(&get, "REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs),
        };

        Ok(Self {
            bind_addr,
            port,
            socrata,
            lookup: LookupOptions {
                query: QueryOptions { category_exclusion },
                window_minutes,
            },
        })
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError {
                key,
                message: e.to_string(),
                value,
            })
        })
        .transpose()
}
