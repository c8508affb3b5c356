use dealflow_core::{AppError, hash_password};
use dealflow_db::{SqlitePool, user_type_for};
use dealflow_models::{LoginRequest, Principal, RegisterRequest};
use dealflow_session::CredentialLookup;
use tracing::instrument;

use super::lookup::DbCredentialLookup;

pub const MISSING_CREDENTIALS: &str = "Username and password are required";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const USERNAME_TAKEN: &str = "Username already exists";

pub struct IdentityService;

impl IdentityService {
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn login(db: &SqlitePool, dto: LoginRequest) -> Result<Principal, AppError> {
        if !dto.is_complete() {
            return Err(AppError::bad_request(MISSING_CREDENTIALS));
        }

        let record = DbCredentialLookup::new(db.clone())
            .find(&dto.username)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        record
            .verify(&dto.password)
            .cloned()
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))
    }

    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn register(db: &SqlitePool, dto: RegisterRequest) -> Result<String, AppError> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
            .bind(&dto.username)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::bad_request(USERNAME_TAKEN));
        }

        let user_type = match dto.role() {
            Some(role) => user_type_for(&role).to_string(),
            None => dto.account_type.clone(),
        };
        let hashed_password = hash_password(&dto.password)?;

        let result = sqlx::query(
            "INSERT INTO users (username, password, email, name, user_type) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&dto.username)
        .bind(&hashed_password)
        .bind(&dto.email)
        .bind(&dto.name)
        .bind(&user_type)
        .execute(db)
        .await;

        match result {
            Ok(_) => Ok(user_type),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::bad_request(USERNAME_TAKEN))
            }
            Err(e) => Err(e.into()),
        }
    }
}
