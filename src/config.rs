use anyhow::Context;

/// Application configuration, read from environment variables.
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | SECRET_KEY | (required) | seeds the form token; startup fails without it |
/// | DATABASE_URL | sqlite:cafes.db | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP listen port |
#[derive(Debug, Clone)]
pub struct Config {
    pub secret_key: String,
    pub database_url: String,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            secret_key: std::env::var("SECRET_KEY").context("SECRET_KEY must be set")?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:cafes.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        })
    }
}
