//! Server settings, read from the environment (and `.env` when present)

use anyhow::{Context, anyhow};
use axum::http::HeaderValue;
use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_address: SocketAddr,
    pub allowed_origins: Vec<HeaderValue>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Settings> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("invalid DATABASE_MAX_CONNECTIONS `{value}`"))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_address = env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned())
            .parse()
            .context("invalid BIND_ADDRESS")?;

        let allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_owned()),
        )?;

        Ok(Settings {
            database_url,
            database_max_connections,
            bind_address,
            allowed_origins,
        })
    }
}

/// Parses a comma-separated origin list, skipping blank entries.
pub fn parse_origins(origins: &str) -> anyhow::Result<Vec<HeaderValue>> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| anyhow!("invalid CORS origin `{origin}`: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_origins_parse() {
        let origins = parse_origins(DEFAULT_ALLOWED_ORIGINS).unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "http://localhost:5173");
    }

    #[test]
    fn blank_entries_are_skipped() {
        let origins = parse_origins(" https://example.com , ,").unwrap();
        assert_eq!(origins, vec![HeaderValue::from_static("https://example.com")]);
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(parse_origins("http://bad\u{7f}origin").is_err());
    }
}
