//! # DealFlow Core
//!
//! Foundational types shared by every DealFlow crate:
//!
//! - [`errors`]: [`AppError`], an `anyhow`-backed error carrying an HTTP status
//! - [`password`]: bcrypt hashing and verification
//! - [`serde`]: serde helpers for loosely typed wire formats
//!
//! # Example
//!
//! ```ignore
//! use dealflow_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("muser")?;
//! assert!(verify_password("muser", &hash)?);
//!
//! let err = AppError::unauthorized("Invalid username or password");
//! ```

pub mod errors;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
