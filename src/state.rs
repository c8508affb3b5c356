use std::sync::Arc;

use dealflow_config::{CorsConfig, DatabaseConfig, SessionConfig};
use dealflow_db::{SqlitePool, init_db_pool, run_migrations, seed_demo_users};
use dealflow_session::{FileSessionStore, SessionAuthority};

use crate::modules::identity::lookup::DbCredentialLookup;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub authority: Arc<SessionAuthority>,
    pub cors_config: CorsConfig,
}

/// Opens and migrates the identity store, seeds the demo users, then builds
/// and initializes the process-wide session authority.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&db).await?;
    seed_demo_users(&db).await?;

    let authority = build_authority(&SessionConfig::from_env(), db.clone())?;
    authority.initialize().await;

    Ok(AppState {
        db,
        authority: Arc::new(authority),
        cors_config: CorsConfig::from_env(),
    })
}

/// Credential chain: demo fixture (if enabled), the `users` table, then the
/// remote identity API (if configured).
pub fn build_authority(config: &SessionConfig, db: SqlitePool) -> anyhow::Result<SessionAuthority> {
    let store = Arc::new(FileSessionStore::new(&config.store_dir));

    Ok(SessionAuthority::builder(store)
        .with_config(config)?
        .provider(DbCredentialLookup::new(db))
        .build())
}
