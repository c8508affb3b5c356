//! # DealFlow CLI
//!
//! Session commands for the `dealflow-cli` binary. Each invocation builds
//! one [`SessionAuthority`] over the file store, initializes it, runs one
//! command and exits, so the persisted session carries state between runs.
//!
//! Commands return the text to print; `main.rs` owns prompting and exit
//! codes.

use std::sync::Arc;

use dealflow_config::SessionConfig;
use dealflow_models::{RegistrationForm, Role, RoleParseError, Session};
use dealflow_session::{
    AccessDecision, AuthOutcome, FileSessionStore, LookupError, RegistrationOutcome,
    SessionAuthority, SessionError, routes::home_route,
};

pub const LOGGED_OUT_MESSAGE: &str = "You have been successfully logged out";
pub const NOT_LOGGED_IN_MESSAGE: &str = "Not logged in";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("could not configure the identity backend: {0}")]
    Backend(#[from] LookupError),

    #[error("invalid role: {0}")]
    Role(#[from] RoleParseError),

    #[error("could not read input: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Builds and initializes the authority described by `config`.
pub async fn open_authority(config: &SessionConfig) -> Result<SessionAuthority, CliError> {
    let store = Arc::new(FileSessionStore::new(&config.store_dir));
    let authority = SessionAuthority::builder(store).with_config(config)?.build();
    authority.initialize().await;
    Ok(authority)
}

fn describe(session: &Session) -> String {
    let home = home_route(&session.role).unwrap_or("-");
    format!(
        "{} ({})\n  id:    {}\n  role:  {}\n  email: {}\n  home:  {}",
        session.name, session.username, session.id, session.role, session.contact_address, home
    )
}

pub async fn login(
    authority: &SessionAuthority,
    username: &str,
    password: &str,
) -> Result<String, CliError> {
    match authority.authenticate(username, password).await? {
        AuthOutcome::Authenticated(session) => {
            let home = home_route(&session.role).unwrap_or("/login");
            Ok(format!("Welcome back, {}!\n  home:  {}", session.name, home))
        }
        AuthOutcome::Rejected(failure) => Err(CliError::Rejected(failure.to_string())),
    }
}

pub async fn logout(authority: &SessionAuthority) -> Result<String, CliError> {
    authority.end_session().await?;
    Ok(LOGGED_OUT_MESSAGE.to_string())
}

pub fn whoami(authority: &SessionAuthority) -> String {
    authority
        .current_session()
        .map(|session| describe(&session))
        .unwrap_or_else(|| NOT_LOGGED_IN_MESSAGE.to_string())
}

pub fn authorize(authority: &SessionAuthority, role: &str) -> Result<String, CliError> {
    let role = role.parse::<Role>()?;
    Ok(match authority.authorize(Some(&role)) {
        AccessDecision::Allow => "allow".to_string(),
        AccessDecision::Redirect { redirect_to } => format!("redirect {}", redirect_to),
        AccessDecision::Pending => "pending".to_string(),
    })
}

pub async fn register(
    authority: &SessionAuthority,
    form: RegistrationForm,
) -> Result<String, CliError> {
    match authority.register(form).await {
        RegistrationOutcome::Registered => {
            Ok("Registration successful. You can now log in.".to_string())
        }
        RegistrationOutcome::Rejected(reason) => Err(CliError::Rejected(reason)),
    }
}
