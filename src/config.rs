// src/config.rs

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use dotenvy::dotenv;

/// Page size used by the question listings when `QUESTIONS_PER_PAGE` is unset.
pub const DEFAULT_QUESTIONS_PER_PAGE: i64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub host: IpAddr,
    pub port: u16,
    pub questions_per_page: i64,
    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<HeaderValue>,
    pub log_dir: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let host = parse_var("HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_var("PORT", 3000u16)?;

        let questions_per_page = parse_var("QUESTIONS_PER_PAGE", DEFAULT_QUESTIONS_PER_PAGE)?;
        if questions_per_page < 1 {
            return Err(ConfigError::Invalid {
                key: "QUESTIONS_PER_PAGE",
                value: questions_per_page.to_string(),
            });
        }

        let cors_allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw)?,
            Err(_) => Vec::new(),
        };

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Ok(Self {
            database_url,
            rust_log,
            host,
            port,
            questions_per_page,
            cors_allowed_origins,
            log_dir,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

/// Splits a comma separated origin list. Any entry that is not a valid
/// header value fails the whole list.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                key: "CORS_ALLOWED_ORIGINS",
                value: origin.to_string(),
            })
        })
        .collect()
}
