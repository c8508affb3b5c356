pub mod dashboards;
pub mod identity;
pub mod session;
