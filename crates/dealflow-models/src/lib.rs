//! # DealFlow Models
//!
//! Data structures shared by the identity API, the session authority and the CLI.
//!
//! # Modules
//!
//! - [`role`]: the [`Role`] a principal acts in (`seller` or `investor`)
//! - [`principal`]: [`Principal`] (identity API wire format) and [`Session`] (persisted, secret-free)
//! - [`auth`]: login/register request and response DTOs
//! - [`registration`]: client-side registration form and its validation

pub mod auth;
pub mod principal;
pub mod registration;
pub mod role;

pub use auth::{ErrorResponse, LoginRequest, MessageResponse, RegisterRequest};
pub use principal::{Principal, Session};
pub use registration::{RegistrationError, RegistrationForm};
pub use role::{Role, RoleParseError};
