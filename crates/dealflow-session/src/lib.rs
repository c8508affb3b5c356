//! # DealFlow Session
//!
//! The role-based session authority: the single owner of "who is logged in"
//! for one running application instance.
//!
//! - [`authority`]: [`SessionAuthority`] with its `uninitialized → initializing → ready` lifecycle
//! - [`credentials`]: credential records, the [`CredentialLookup`] / [`CredentialProvider`] seams and the ordered [`CredentialChain`]
//! - [`store`]: persisted session state ([`FileSessionStore`], [`MemorySessionStore`])
//! - [`remote`]: HTTP client for a remote identity API, used as the last credential provider and as registrar
//! - [`routes`]: the login route and each role's home route
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dealflow_session::{AccessDecision, AuthOutcome, MemorySessionStore, SessionAuthority};
//! use dealflow_models::Role;
//!
//! let authority = SessionAuthority::builder(Arc::new(MemorySessionStore::new()))
//!     .fixture_users(true)
//!     .build();
//!
//! authority.initialize().await;
//! let outcome = authority.authenticate("muser", "muser").await?;
//! assert!(matches!(outcome, AuthOutcome::Authenticated(_)));
//! assert_eq!(authority.authorize(Some(&Role::Seller)), AccessDecision::Allow);
//! ```

pub mod authority;
pub mod credentials;
pub mod error;
pub mod remote;
pub mod routes;
pub mod store;

pub use authority::{
    AccessDecision, AuthFailure, AuthOutcome, BACKEND_UNAVAILABLE_MESSAGE, Readiness,
    RegistrationOutcome, Registrar, SessionAuthority, SessionAuthorityBuilder, SessionStatus,
};
pub use credentials::{
    CredentialChain, CredentialLookup, CredentialProvider, CredentialRecord, FixtureLookup, Secret,
    demo_records,
};
pub use error::{LookupError, SessionError, StoreError};
pub use remote::RemoteIdentityClient;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

pub use dealflow_models::{Role, Session};
