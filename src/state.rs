use minijinja::Environment;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::views;

/// Shared application state, constructed once in `main` and handed to every
/// handler through `axum::extract::State`.
pub struct AppState {
    pub db: SqlitePool,
    pub views: Environment<'static>,
    /// Per-process form token embedded in every rendered form and checked
    /// on every POST. Derived from the configured secret key.
    pub form_token: String,
}

impl AppState {
    pub fn new(config: &Config, db: SqlitePool) -> Result<Self, minijinja::Error> {
        Ok(Self {
            db,
            views: views::environment()?,
            form_token: form_token(&config.secret_key),
        })
    }
}

fn form_token(secret_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"cafedex.form-token.v1:");
    hasher.update(secret_key.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_token_is_stable_for_a_given_secret() {
        assert_eq!(form_token("abc"), form_token("abc"));
        assert_ne!(form_token("abc"), form_token("abd"));
    }
}
