//! Credential records and the lookup chain.
//!
//! Two seams:
//!
//! - [`CredentialLookup`] finds a stored [`CredentialRecord`] by username. Any
//!   store that can hand back a record (a fixture list, a database table)
//!   implements this and gets secret verification for free.
//! - [`CredentialProvider`] answers "do these credentials name a principal?"
//!   directly. Backends that never reveal records (a remote identity API)
//!   implement this one.
//!
//! [`CredentialChain`] consults providers in order. A provider that errors is
//! logged and skipped; the first match wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use dealflow_core::verify_password;
use dealflow_models::{Principal, Role};
use tracing::{debug, instrument, warn};

use crate::error::LookupError;

/// A stored secret.
#[derive(Clone, PartialEq, Eq)]
pub enum Secret {
    /// Compared by exact string equality.
    Plain(String),
    /// A bcrypt hash.
    Bcrypt(String),
}

impl Secret {
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Secret::Plain(expected) => expected == candidate,
            Secret::Bcrypt(hash) => verify_password(candidate, hash).unwrap_or_else(|e| {
                warn!(error = %e.message(), "Stored bcrypt hash is unreadable");
                false
            }),
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Secret::Plain(_) => f.write_str("Secret::Plain(<redacted>)"),
            Secret::Bcrypt(_) => f.write_str("Secret::Bcrypt(<redacted>)"),
        }
    }
}

/// Maps a username/secret pair to a principal.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub secret: Secret,
    pub principal: Principal,
}

impl CredentialRecord {
    pub fn new(principal: Principal, secret: Secret) -> Self {
        Self { secret, principal }
    }

    pub fn username(&self) -> &str {
        &self.principal.username
    }

    /// The principal, if `candidate` is this record's secret.
    pub fn verify(&self, candidate: &str) -> Option<&Principal> {
        self.secret.matches(candidate).then_some(&self.principal)
    }
}

#[async_trait]
pub trait CredentialLookup: Send + Sync {
    fn name(&self) -> &str;

    async fn find(&self, username: &str) -> Result<Option<CredentialRecord>, LookupError>;
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    fn label(&self) -> &str;

    async fn verify(&self, username: &str, secret: &str)
    -> Result<Option<Principal>, LookupError>;
}

#[async_trait]
impl<L> CredentialProvider for L
where
    L: CredentialLookup,
{
    fn label(&self) -> &str {
        self.name()
    }

    async fn verify(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<Option<Principal>, LookupError> {
        let record = self.find(username).await?;
        Ok(record.and_then(|r| r.verify(secret).cloned()))
    }
}

/// The two demo principals the dashboards ship with.
///
/// Secrets are plain because these records are compared by exact match.
pub fn demo_records() -> Vec<CredentialRecord> {
    vec![
        CredentialRecord::new(
            Principal {
                id: "1".to_string(),
                username: "muser".to_string(),
                name: "Mock Company Owner".to_string(),
                email: "owner@example.com".to_string(),
                role: Role::Seller,
            },
            Secret::Plain("muser".to_string()),
        ),
        CredentialRecord::new(
            Principal {
                id: "2".to_string(),
                username: "mpe".to_string(),
                name: "Mock Private Equity".to_string(),
                email: "investor@example.com".to_string(),
                role: Role::Investor,
            },
            Secret::Plain("mpe".to_string()),
        ),
    ]
}

/// An in-memory record set with unique usernames.
#[derive(Debug, Clone, Default)]
pub struct FixtureLookup {
    records: HashMap<String, CredentialRecord>,
}

impl FixtureLookup {
    pub fn new(
        records: impl IntoIterator<Item = CredentialRecord>,
    ) -> Result<Self, LookupError> {
        let mut by_username = HashMap::new();
        for record in records {
            let username = record.username().to_string();
            if by_username.insert(username.clone(), record).is_some() {
                return Err(LookupError::DuplicateUsername(username));
            }
        }

        Ok(Self {
            records: by_username,
        })
    }

    /// `muser`/`muser` (seller) and `mpe`/`mpe` (investor).
    pub fn demo() -> Self {
        Self {
            records: demo_records()
                .into_iter()
                .map(|r| (r.username().to_string(), r))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CredentialLookup for FixtureLookup {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn find(&self, username: &str) -> Result<Option<CredentialRecord>, LookupError> {
        Ok(self.records.get(username).cloned())
    }
}

/// Credential providers in precedence order.
#[derive(Clone, Default)]
pub struct CredentialChain {
    providers: Vec<Arc<dyn CredentialProvider>>,
}

impl fmt::Debug for CredentialChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.label()))
            .finish()
    }
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, provider: Arc<dyn CredentialProvider>) {
        self.providers.push(provider);
    }

    pub fn with_provider(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.push(Arc::new(provider));
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.label()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// The first principal any provider vouches for.
    #[instrument(skip(self, secret))]
    pub async fn verify(&self, username: &str, secret: &str) -> Option<Principal> {
        for provider in &self.providers {
            match provider.verify(username, secret).await {
                Ok(Some(principal)) => {
                    debug!(provider = %provider.label(), "Credentials accepted");
                    return Some(principal);
                }
                Ok(None) => {
                    debug!(provider = %provider.label(), "No match");
                }
                Err(e) => {
                    warn!(provider = %provider.label(), error = %e, "Credential provider failed, trying next");
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealflow_core::hash_password;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingProvider;

    #[async_trait]
    impl CredentialProvider for FailingProvider {
        fn label(&self) -> &str {
            "failing"
        }

        async fn verify(&self, _: &str, _: &str) -> Result<Option<Principal>, LookupError> {
            Err(LookupError::Transport("connection refused".to_string()))
        }
    }

    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CredentialProvider for CountingProvider {
        fn label(&self) -> &str {
            "counting"
        }

        async fn verify(&self, _: &str, _: &str) -> Result<Option<Principal>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    fn principal(username: &str) -> Principal {
        Principal {
            id: format!("id-{}", username),
            username: username.to_string(),
            name: username.to_uppercase(),
            email: format!("{}@example.com", username),
            role: Role::Investor,
        }
    }

    #[test]
    fn test_plain_secret_is_exact_match() {
        let secret = Secret::Plain("muser".to_string());
        assert!(secret.matches("muser"));
        assert!(!secret.matches("Muser"));
        assert!(!secret.matches("muser "));
        assert!(!secret.matches(""));
    }

    #[test]
    fn test_bcrypt_secret() {
        let secret = Secret::Bcrypt(hash_password("s3cret").unwrap());
        assert!(secret.matches("s3cret"));
        assert!(!secret.matches("other"));
    }

    #[test]
    fn test_unreadable_hash_never_matches() {
        let secret = Secret::Bcrypt("garbage".to_string());
        assert!(!secret.matches("garbage"));
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let rendered = format!("{:?}", Secret::Plain("hunter2".to_string()));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_fixture_rejects_duplicate_usernames() {
        let records = vec![
            CredentialRecord::new(principal("a"), Secret::Plain("1".into())),
            CredentialRecord::new(principal("a"), Secret::Plain("2".into())),
        ];
        let err = FixtureLookup::new(records).unwrap_err();
        assert!(matches!(err, LookupError::DuplicateUsername(name) if name == "a"));
    }

    #[tokio::test]
    async fn test_demo_fixture() {
        let fixture = FixtureLookup::demo();
        assert_eq!(fixture.len(), 2);

        let seller = fixture.verify("muser", "muser").await.unwrap().unwrap();
        assert_eq!(seller.role, Role::Seller);

        let investor = fixture.verify("mpe", "mpe").await.unwrap().unwrap();
        assert_eq!(investor.role, Role::Investor);

        assert!(fixture.verify("muser", "mpe").await.unwrap().is_none());
        assert!(fixture.verify("nobody", "muser").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_chain_skips_failing_provider() {
        let chain = CredentialChain::new()
            .with_provider(FailingProvider)
            .with_provider(FixtureLookup::demo());

        let found = chain.verify("mpe", "mpe").await;
        assert_eq!(found.map(|p| p.username), Some("mpe".to_string()));
    }

    #[tokio::test]
    async fn test_chain_stops_at_first_match() {
        let counter = Arc::new(CountingProvider::default());
        let mut chain = CredentialChain::new().with_provider(FixtureLookup::demo());
        chain.push(counter.clone());

        assert!(chain.verify("muser", "muser").await.is_some());
        assert_eq!(counter.calls.load(Ordering::SeqCst), 0);

        assert!(chain.verify("muser", "wrong").await.is_none());
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_chain_order_decides_precedence() {
        let shadow = FixtureLookup::new(vec![CredentialRecord::new(
            Principal {
                role: Role::Investor,
                ..principal("muser")
            },
            Secret::Plain("muser".into()),
        )])
        .unwrap();

        let chain = CredentialChain::new()
            .with_provider(shadow)
            .with_provider(FixtureLookup::demo());

        let found = chain.verify("muser", "muser").await.unwrap();
        assert_eq!(found.role, Role::Investor);
        assert_eq!(chain.labels(), vec!["fixture", "fixture"]);
    }

    #[tokio::test]
    async fn test_empty_chain_matches_nothing() {
        assert!(CredentialChain::new().verify("muser", "muser").await.is_none());
    }
}
