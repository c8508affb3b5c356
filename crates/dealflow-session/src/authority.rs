//! The session authority.
//!
//! One [`SessionAuthority`] exists per running application instance. It is
//! built explicitly, shared behind an `Arc`, and moves through
//! `uninitialized → initializing → ready` exactly once. Until it is ready,
//! reads report "not yet determined" and mutations fail with
//! [`SessionError::NotReady`].
//!
//! Mutations (`initialize`, `authenticate`, `end_session`) hold an async mutex
//! for their whole duration, persistence I/O included. Reads take a short
//! synchronous lock and never touch the store.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use dealflow_config::SessionConfig;
use dealflow_models::{RegisterRequest, RegistrationForm, Role, Session};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::credentials::{CredentialChain, CredentialProvider, FixtureLookup};
use crate::error::{LookupError, SessionError};
use crate::remote::RemoteIdentityClient;
use crate::routes::{LOGIN_ROUTE, home_route};
use crate::store::SessionStore;

pub const BACKEND_UNAVAILABLE_MESSAGE: &str =
    "Backend not available. Please use mock users for testing: muser/muser or mpe/mpe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Uninitialized,
    Initializing,
    Ready,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Readiness::Uninitialized => "uninitialized",
            Readiness::Initializing => "initializing",
            Readiness::Ready => "ready",
        })
    }
}

/// What the authority currently knows about the principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Persisted state has not been read yet.
    Undetermined,
    Anonymous,
    Authenticated(Session),
}

/// Route guard verdict. The caller performs any navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum AccessDecision {
    Allow,
    Redirect {
        #[serde(rename = "redirectTo")]
        redirect_to: String,
    },
    /// Not yet determined; render nothing and ask again.
    Pending,
}

impl AccessDecision {
    fn redirect(to: &str) -> Self {
        AccessDecision::Redirect {
            redirect_to: to.to_string(),
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            AccessDecision::Redirect { redirect_to } => Some(redirect_to),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username and password are required")]
    MissingCredentials,
}

impl AuthFailure {
    /// Stable snake_case label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials => "invalid_credentials",
            AuthFailure::MissingCredentials => "missing_credentials",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(Session),
    Rejected(AuthFailure),
}

impl AuthOutcome {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthOutcome::Authenticated(session) => Some(session),
            AuthOutcome::Rejected(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    Rejected(String),
}

/// Creates accounts on an identity backend.
#[async_trait]
pub trait Registrar: Send + Sync {
    async fn register(&self, request: &RegisterRequest)
    -> Result<RegistrationOutcome, LookupError>;
}

#[derive(Debug)]
struct State {
    readiness: Readiness,
    session: Option<Session>,
}

pub struct SessionAuthority {
    chain: CredentialChain,
    store: Arc<dyn SessionStore>,
    storage_key: String,
    registrar: Option<Arc<dyn Registrar>>,
    state: RwLock<State>,
    mutation: Mutex<()>,
}

impl fmt::Debug for SessionAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionAuthority")
            .field("chain", &self.chain)
            .field("storage_key", &self.storage_key)
            .field("has_registrar", &self.registrar.is_some())
            .field("state", &*self.state.read())
            .finish()
    }
}

impl SessionAuthority {
    pub fn builder(store: Arc<dyn SessionStore>) -> SessionAuthorityBuilder {
        SessionAuthorityBuilder::new(store)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn readiness(&self) -> Readiness {
        self.state.read().readiness
    }

    /// Restores persisted state and marks the authority ready.
    ///
    /// Never fails: unreadable or malformed state means "no session". Calling
    /// it again once ready returns the current session without touching the
    /// store.
    #[instrument(skip(self), fields(storage_key = %self.storage_key))]
    pub async fn initialize(&self) -> Option<Session> {
        let _guard = self.mutation.lock().await;

        {
            let mut state = self.state.write();
            if state.readiness == Readiness::Ready {
                return state.session.clone();
            }
            state.readiness = Readiness::Initializing;
        }

        let restored = self.restore().await;

        let mut state = self.state.write();
        state.session = restored.clone();
        state.readiness = Readiness::Ready;

        match &restored {
            Some(session) => info!(user_id = %session.id, role = %session.role, "Session restored"),
            None => debug!("No persisted session"),
        }

        restored
    }

    async fn restore(&self) -> Option<Session> {
        let raw = match self.store.read(&self.storage_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session, starting without one");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "Persisted session is malformed, discarding it");
                if let Err(e) = self.store.remove(&self.storage_key).await {
                    warn!(error = %e, "Failed to remove malformed session state");
                }
                None
            }
        }
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        match self.readiness() {
            Readiness::Ready => Ok(()),
            other => Err(SessionError::NotReady(other)),
        }
    }

    /// Validates credentials against the chain and, on a match, establishes
    /// and persists the session.
    ///
    /// Unknown usernames and wrong secrets produce the same rejection.
    #[instrument(skip(self, secret))]
    pub async fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<AuthOutcome, SessionError> {
        self.ensure_ready()?;

        if identifier.is_empty() || secret.is_empty() {
            return Ok(AuthOutcome::Rejected(AuthFailure::MissingCredentials));
        }

        let _guard = self.mutation.lock().await;

        let Some(principal) = self.chain.verify(identifier, secret).await else {
            info!("Login rejected");
            return Ok(AuthOutcome::Rejected(AuthFailure::InvalidCredentials));
        };

        let session = Session::from(principal);
        self.persist(&session).await;
        self.state.write().session = Some(session.clone());

        info!(user_id = %session.id, role = %session.role, "Session established");
        Ok(AuthOutcome::Authenticated(session))
    }

    async fn persist(&self, session: &Session) {
        let serialized = match serde_json::to_string(session) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to serialize session, keeping it in memory only");
                return;
            }
        };

        if let Err(e) = self.store.write(&self.storage_key, &serialized).await {
            warn!(error = %e, "Failed to persist session, keeping it in memory only");
        }
    }

    /// Clears the session in memory and in the store. Idempotent.
    #[instrument(skip(self))]
    pub async fn end_session(&self) -> Result<(), SessionError> {
        self.ensure_ready()?;

        let _guard = self.mutation.lock().await;

        let previous = self.state.write().session.take();
        if let Err(e) = self.store.remove(&self.storage_key).await {
            warn!(error = %e, "Failed to delete persisted session");
        }

        if let Some(session) = previous {
            info!(user_id = %session.id, "Session ended");
        }
        Ok(())
    }

    /// `None` both when anonymous and while undetermined; use
    /// [`status`](Self::status) to tell them apart.
    pub fn current_session(&self) -> Option<Session> {
        let state = self.state.read();
        match state.readiness {
            Readiness::Ready => state.session.clone(),
            _ => None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        let state = self.state.read();
        match (state.readiness, &state.session) {
            (Readiness::Ready, Some(session)) => SessionStatus::Authenticated(session.clone()),
            (Readiness::Ready, None) => SessionStatus::Anonymous,
            _ => SessionStatus::Undetermined,
        }
    }

    pub fn authorize(&self, required: Option<&Role>) -> AccessDecision {
        let state = self.state.read();
        if state.readiness != Readiness::Ready {
            return AccessDecision::Pending;
        }

        let Some(session) = &state.session else {
            return AccessDecision::redirect(LOGIN_ROUTE);
        };

        match required {
            None => AccessDecision::Allow,
            Some(role) if *role == session.role => AccessDecision::Allow,
            Some(_) => AccessDecision::redirect(home_route(&session.role).unwrap_or(LOGIN_ROUTE)),
        }
    }

    /// Runs the registration flow. Never establishes a session.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: RegistrationForm) -> RegistrationOutcome {
        if let Err(e) = form.check() {
            return RegistrationOutcome::Rejected(e.to_string());
        }

        let Some(registrar) = &self.registrar else {
            warn!("No registrar configured");
            return RegistrationOutcome::Rejected(BACKEND_UNAVAILABLE_MESSAGE.to_string());
        };

        match registrar.register(&form.into_request()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Registrar failed");
                RegistrationOutcome::Rejected(BACKEND_UNAVAILABLE_MESSAGE.to_string())
            }
        }
    }
}

/// Assembles the credential chain in precedence order: fixture records,
/// then custom providers in the order added, then the remote client.
pub struct SessionAuthorityBuilder {
    store: Arc<dyn SessionStore>,
    storage_key: String,
    fixture_users: bool,
    providers: Vec<Arc<dyn CredentialProvider>>,
    remote: Option<RemoteIdentityClient>,
    registrar: Option<Arc<dyn Registrar>>,
}

impl SessionAuthorityBuilder {
    fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            storage_key: dealflow_config::DEFAULT_STORAGE_KEY.to_string(),
            fixture_users: false,
            providers: Vec::new(),
            remote: None,
            registrar: None,
        }
    }

    /// Applies storage key, fixture toggle and remote client from config.
    pub fn with_config(mut self, config: &SessionConfig) -> Result<Self, LookupError> {
        self.storage_key = config.storage_key.clone();
        self.fixture_users = config.fixture_users;
        self.remote = RemoteIdentityClient::from_config(config)?;
        Ok(self)
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn fixture_users(mut self, enabled: bool) -> Self {
        self.fixture_users = enabled;
        self
    }

    pub fn provider(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn remote(mut self, client: RemoteIdentityClient) -> Self {
        self.remote = Some(client);
        self
    }

    /// Overrides the registrar. Defaults to the remote client, if any.
    pub fn registrar(mut self, registrar: impl Registrar + 'static) -> Self {
        self.registrar = Some(Arc::new(registrar));
        self
    }

    pub fn build(self) -> SessionAuthority {
        let mut chain = CredentialChain::new();
        if self.fixture_users {
            chain.push(Arc::new(FixtureLookup::demo()));
        }
        for provider in self.providers {
            chain.push(provider);
        }

        let mut registrar = self.registrar;
        if let Some(remote) = self.remote {
            let remote = Arc::new(remote);
            chain.push(remote.clone());
            if registrar.is_none() {
                registrar = Some(remote);
            }
        }

        debug!(providers = ?chain.labels(), "Session authority built");

        SessionAuthority {
            chain,
            store: self.store,
            storage_key: self.storage_key,
            registrar,
            state: RwLock::new(State {
                readiness: Readiness::Uninitialized,
                session: None,
            }),
            mutation: Mutex::new(()),
        }
    }
}
