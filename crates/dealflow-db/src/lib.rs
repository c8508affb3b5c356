//! # DealFlow DB
//!
//! SQLite pool for the identity store, its embedded migrations, and seeding
//! of the demo principals.
//!
//! # Example
//!
//! ```ignore
//! use dealflow_config::DatabaseConfig;
//! use dealflow_db::{init_db_pool, run_migrations, seed_demo_users};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! seed_demo_users(&pool).await?;
//! ```

use anyhow::Context;
use dealflow_config::DatabaseConfig;
use dealflow_core::hash_password;
use dealflow_session::{Role, Secret, demo_records};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, instrument};

pub use sqlx::SqlitePool;

/// Opens the pool described by `config`.
///
/// In-memory databases live as long as their connection, so idle reaping is
/// disabled for them.
#[instrument(skip(config))]
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let mut options = SqlitePoolOptions::new().max_connections(config.max_connections);
    if config.url.contains(":memory:") {
        options = options.idle_timeout(None).max_lifetime(None);
    }

    let pool = options
        .connect(&config.url)
        .await
        .with_context(|| format!("Failed to connect to database at {}", config.url))?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    migrator()
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

/// The `user_type` column keeps the identity API's vocabulary.
pub fn user_type_for(role: &Role) -> &str {
    role.user_type()
}

/// Inserts the demo principals unless their usernames already exist.
///
/// Returns how many rows were inserted.
#[instrument(skip(pool))]
pub async fn seed_demo_users(pool: &SqlitePool) -> anyhow::Result<u64> {
    let mut inserted = 0;

    for record in demo_records() {
        let hash = match &record.secret {
            Secret::Plain(secret) => hash_password(secret)
                .map_err(|e| anyhow::anyhow!("Failed to hash demo password: {}", e.message()))?,
            Secret::Bcrypt(hash) => hash.clone(),
        };
        let principal = &record.principal;

        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (username, password, email, name, user_type) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&principal.username)
        .bind(&hash)
        .bind(&principal.email)
        .bind(&principal.name)
        .bind(user_type_for(&principal.role))
        .execute(pool)
        .await
        .with_context(|| format!("Failed to seed user {}", principal.username))?;

        inserted += result.rows_affected();
    }

    if inserted > 0 {
        info!(inserted, "Seeded demo users");
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pool() -> SqlitePool {
        let pool = init_db_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = pool().await;

        assert_eq!(seed_demo_users(&pool).await.unwrap(), 2);
        assert_eq!(seed_demo_users(&pool).await.unwrap(), 0);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_seeded_passwords_are_hashed() {
        let pool = pool().await;
        seed_demo_users(&pool).await.unwrap();

        let (password, user_type): (String, String) =
            sqlx::query_as("SELECT password, user_type FROM users WHERE username = ?")
                .bind("muser")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_ne!(password, "muser");
        assert!(dealflow_core::verify_password("muser", &password).unwrap());
        assert_eq!(user_type, "company");
    }

    #[test]
    fn test_user_type_for() {
        assert_eq!(user_type_for(&Role::Seller), "company");
        assert_eq!(user_type_for(&Role::Investor), "investor");
    }
}
