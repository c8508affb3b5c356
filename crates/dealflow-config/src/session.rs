//! Session authority configuration.
//!
//! # Environment Variables
//!
//! - `SESSION_STORE_DIR`: directory holding persisted session state (default: `storage/session`)
//! - `SESSION_STORAGE_KEY`: well-known key the session is stored under (default: `user`)
//! - `SESSION_FIXTURE_USERS`: consult the built-in demo credentials first (default: `true`)
//! - `REMOTE_AUTH_URL`: base URL of a remote identity API, e.g. `http://localhost:3000` (unset disables it)
//! - `REMOTE_AUTH_TIMEOUT_MS`: per-request timeout for the remote identity API (default: `3000`)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::{env_flag, env_parse};

pub const DEFAULT_STORAGE_KEY: &str = "user";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub store_dir: PathBuf,
    pub storage_key: String,
    pub fixture_users: bool,
    pub remote_auth_url: Option<String>,
    pub remote_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("storage/session"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            fixture_users: true,
            remote_auth_url: None,
            remote_timeout: Duration::from_millis(3000),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            store_dir: env::var("SESSION_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_dir),
            storage_key: env::var("SESSION_STORAGE_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .unwrap_or(defaults.storage_key),
            fixture_users: env_flag("SESSION_FIXTURE_USERS", defaults.fixture_users),
            remote_auth_url: env::var("REMOTE_AUTH_URL")
                .ok()
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
            remote_timeout: Duration::from_millis(env_parse("REMOTE_AUTH_TIMEOUT_MS", 3000)),
        }
    }
}
