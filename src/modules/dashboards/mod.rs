//! The two role-gated dashboards. Content is owned by the front end; these
//! endpoints only confirm who is entering.

pub mod controller;
pub mod router;

pub use controller::DashboardResponse;
