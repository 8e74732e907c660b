use anyhow::{Context, Result};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Public hostname of the directory, e.g. "altdir.dev".
    /// Backlink verification looks for links pointing at this host.
    pub directory_host: String,
    /// Base price for a sponsor-plan submission, in USD.
    pub sponsor_price: Decimal,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "altdir".to_string()),
            directory_host: env::var("DIRECTORY_HOST")
                .unwrap_or_else(|_| "altdir.dev".to_string()),
            sponsor_price: env::var("SPONSOR_PRICE")
                .unwrap_or_else(|_| "99.00".to_string())
                .parse()
                .context("SPONSOR_PRICE must be a valid decimal amount")?,
        })
    }
}
