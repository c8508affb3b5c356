//! HTTP surface of the process-wide session authority.

pub mod controller;
pub mod model;
pub mod router;

pub use controller::not_ready;
