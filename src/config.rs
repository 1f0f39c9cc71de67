//! Application configuration management.
//!
//! Configuration is read from environment variables with the `envy` crate,
//! after an optional `.env` file has been loaded.

use chrono_tz::Tz;
use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `TIME_ZONE` (optional): IANA zone that defines "today", defaults to `America/Sao_Paulo`
/// - `PUBLIC_URL` (optional): base URL embedded in the kiosk QR code
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    #[serde(default)]
    pub public_url: Option<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_time_zone() -> String {
    "America/Sao_Paulo".to_string()
}

/// Configuration values that could be read but not interpreted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] envy::Error),

    #[error("Unknown time zone: {0}")]
    TimeZone(String),

    #[error("Invalid PUBLIC_URL: {0}")]
    PublicUrl(#[from] url::ParseError),
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` first when present (missing file is not an error).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()?;
        // Fail at startup rather than on the first request
        config.tz()?;
        config.public_base()?;
        Ok(config)
    }

    /// The configured zone used for "today" and for local clock times.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| ConfigError::TimeZone(self.time_zone.clone()))
    }

    /// Base URL for scan links, normalized to end with a slash so that
    /// relative joins keep any path prefix.
    pub fn public_base(&self) -> Result<Option<Url>, ConfigError> {
        match self.public_url.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => {
                let mut url = Url::parse(raw)?;
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                Ok(Some(url))
            }
        }
    }
}
