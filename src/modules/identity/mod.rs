//! The identity API: account lookup, login and registration against the
//! `users` table.

pub mod controller;
pub mod lookup;
pub mod model;
pub mod router;
pub mod service;
