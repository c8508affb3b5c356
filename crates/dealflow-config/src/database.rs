//! Identity store database settings.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: SQLite connection string (default: `sqlite://dealflow.db?mode=rwc`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)

use std::env;

use crate::env_parse;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://dealflow.db?mode=rwc".to_string()),
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 5),
        }
    }

    /// A private in-memory database, used by tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}
