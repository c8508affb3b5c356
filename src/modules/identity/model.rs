use dealflow_models::{Principal, Role};
use dealflow_session::{CredentialRecord, LookupError, Secret};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    pub user_type: String,
}

impl UserRow {
    pub fn into_record(self) -> Result<CredentialRecord, LookupError> {
        let role = self.user_type.parse::<Role>().map_err(|e| {
            LookupError::Backend(format!("user {} has an unusable type: {}", self.username, e))
        })?;

        Ok(CredentialRecord::new(
            Principal {
                id: self.id.to_string(),
                username: self.username,
                name: self.name,
                email: self.email,
                role,
            },
            Secret::Bcrypt(self.password),
        ))
    }
}
