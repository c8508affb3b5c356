use async_trait::async_trait;
use dealflow_db::SqlitePool;
use dealflow_session::{CredentialLookup, CredentialRecord, LookupError};
use tracing::instrument;

use super::model::UserRow;

/// Credential records backed by the `users` table.
#[derive(Debug, Clone)]
pub struct DbCredentialLookup {
    db: SqlitePool,
}

impl DbCredentialLookup {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialLookup for DbCredentialLookup {
    fn name(&self) -> &str {
        "database"
    }

    #[instrument(skip(self))]
    async fn find(&self, username: &str) -> Result<Option<CredentialRecord>, LookupError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, email, name, user_type FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| LookupError::Backend(e.to_string()))?;

        row.map(UserRow::into_record).transpose()
    }
}
