use error_stack::{Report, ResultExt};
use movies_routes::service::DEFAULT_OPERATION_TIMEOUT;
use std::str::FromStr;
use std::time::Duration;

pub type ConfigResult<T> = Result<T, Report<ConfigError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} has an invalid value")]
    Invalid(&'static str),
}

const DATABASE_URL: &str = "DATABASE_URL";
const DATABASE_NAME: &str = "MOVIES_DATABASE_NAME";
const PORT: &str = "MOVIES_PORT";
const OPERATION_TIMEOUT_SECS: &str = "MOVIES_OPERATION_TIMEOUT_SECS";
const METRICS_ENABLED: &str = "MOVIES_METRICS_ENABLED";

const DEFAULT_DATABASE_NAME: &str = "magic-stream";
const DEFAULT_PORT: u16 = 3000;

#[derive(Clone)]
pub struct AppConfig {
    /// May carry credentials, never log it.
    pub database_url: String,
    pub database_name: String,
    pub port: u16,
    /// The bounded operation window of every store call.
    pub operation_timeout: Duration,
    pub metrics_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let database_url = lookup(DATABASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL))?;

        let operation_timeout_secs: u64 =
            parse_or(&lookup, OPERATION_TIMEOUT_SECS, DEFAULT_OPERATION_TIMEOUT.as_secs())?;
        if operation_timeout_secs == 0 {
            return Err(Report::new(ConfigError::Invalid(OPERATION_TIMEOUT_SECS)))
                .attach("the operation window must be at least one second");
        }

        Ok(Self {
            database_url,
            database_name: lookup(DATABASE_NAME).unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            port: parse_or(&lookup, PORT, DEFAULT_PORT)?,
            operation_timeout: Duration::from_secs(operation_timeout_secs),
            metrics_enabled: parse_or(&lookup, METRICS_ENABLED, true)?,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .change_context(ConfigError::Invalid(key))
            .attach_with(|| format!("got '{value}'")),
        None => Ok(default),
    }
}
