//! # DealFlow API
//!
//! The identity API and role-based session authority behind the DealFlow
//! deal-sourcing platform, built with Axum and SQLite.
//!
//! ## Overview
//!
//! - **Identity API**: `POST /api/login` and `POST /api/register` against a
//!   SQLite `users` table with bcrypt-hashed passwords
//! - **Session Authority**: one [`SessionAuthority`](dealflow_session::SessionAuthority)
//!   per process, exposed under `/api/session`
//! - **Role guards**: `/company-dashboard` (sellers) and `/investor-dashboard`
//!   (investors) redirect anyone else
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Role guards
//! ├── modules/          # Feature modules
//! │   ├── identity/    # Login, registration, database credential lookup
//! │   ├── session/     # Session authority endpoints
//! │   └── dashboards/  # Role-gated dashboards
//! ├── docs.rs           # OpenAPI documentation
//! ├── logging.rs        # Tracing subscriber and request logging
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Each feature module follows the same layout: `controller.rs` (handlers),
//! `service.rs` (business logic, where there is any), `model.rs` and
//! `router.rs`.
//!
//! ## Roles and Routes
//!
//! | Role | Accepted as | Home route |
//! |------|-------------|------------|
//! | Seller | `seller`, `company` | `/company-dashboard` |
//! | Investor | `investor` | `/investor-dashboard` |
//!
//! Unauthenticated visitors are sent to `/login`. A session entering the
//! other role's dashboard is sent to its own home route.
//!
//! ## Quick Start
//!
//! ```bash
//! DATABASE_URL=sqlite://dealflow.db?mode=rwc
//! SESSION_STORE_DIR=storage/session
//! SESSION_FIXTURE_USERS=true
//! ```
//!
//! The demo users `muser`/`muser` (seller) and `mpe`/`mpe` (investor) are
//! seeded at startup. Swagger UI is served at `/swagger-ui`.

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use dealflow_config;
pub use dealflow_core;
pub use dealflow_db;
pub use dealflow_models;
pub use dealflow_session;
