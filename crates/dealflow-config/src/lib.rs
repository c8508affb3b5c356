//! # DealFlow Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`session`]: session store location, storage key, remote credential endpoint
//! - [`database`]: SQLite connection settings for the identity store
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: bind address for the HTTP server
//!
//! Every struct exposes `from_env()` with defaults suitable for local development.
//!
//! # Example
//!
//! ```ignore
//! use dealflow_config::{CorsConfig, DatabaseConfig, SessionConfig};
//!
//! let session_config = SessionConfig::from_env();
//! let database_config = DatabaseConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod server;
pub mod session;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use session::{DEFAULT_STORAGE_KEY, SessionConfig};

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| {
            let v = v.trim().to_lowercase();
            v != "false" && v != "0" && v != "no"
        })
        .unwrap_or(default)
}
