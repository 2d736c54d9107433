use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use std::env;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,

    /// Timezone event dates and times are written in.
    pub event_timezone: Tz,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections: u32 = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3296".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let event_timezone = parse_timezone(
            &env::var("EVENT_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
        )?;

        debug!("Event timezone: {}", event_timezone);

        Ok(Self {
            database_url,
            max_connections,
            host,
            port,
            event_timezone,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| anyhow!("EVENT_TIMEZONE '{}' is not a known IANA timezone", name))
}
