//! Error types for the session authority.
//!
//! Only contract violations surface as [`SessionError`]. Rejected
//! credentials are an [`AuthOutcome`](crate::AuthOutcome), and store or
//! lookup failures are logged and absorbed by the authority.

use std::time::Duration;

use crate::authority::Readiness;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session authority is not ready (currently {0})")]
    NotReady(Readiness),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("credential backend timed out after {0:?}")]
    Timeout(Duration),

    #[error("credential backend unreachable: {0}")]
    Transport(String),

    #[error("credential backend returned status {0}")]
    UnexpectedStatus(u16),

    #[error("credential backend returned an invalid body: {0}")]
    Decode(String),

    #[error("credential backend error: {0}")]
    Backend(String),

    #[error("duplicate username in credential records: {0}")]
    DuplicateUsername(String),
}
