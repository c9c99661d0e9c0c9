pub mod auth;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;
use std::time::Duration;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use auth::{AuthService, ConfirmOutcome, ConfirmationTokens, LoginStatus};
pub use db::{DbOperations, LeaderboardEntry, LevelExp, Player, ProfileInfo, UserRank, UserScore};

/// Everything the web layer needs, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub db: DbOperations,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        // Initialize database connection pool and schema
        let db = DbOperations::new_with_options(
            &config.database.url,
            config.database.max_connections,
            Duration::from_secs(30),
        )
        .await?
        .with_bcrypt_cost(config.security.bcrypt_cost);

        Ok(Self::with_db(config, db))
    }

    pub fn with_db(config: Settings, db: DbOperations) -> Self {
        let tokens = ConfirmationTokens::from_config(&config.security);
        let auth_service = AuthService::new(db.clone(), tokens);

        Self {
            config: Arc::new(config),
            db,
            auth_service: Arc::new(auth_service),
        }
    }

    pub async fn shutdown(&self) -> Result<()> {
        // Close database connections
        self.db.close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_state_creation() {
        let config = Settings::new_for_test().expect("Failed to load test config");
        let state = AppState::new(config).await.expect("Failed to build state");

        assert!(!state.db.account_exists("nobody").await.unwrap());
        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_app_state_bad_url() {
        let mut config = Settings::new_for_test().expect("Failed to load test config");
        config.database.url = "sqlite:/nonexistent-dir/minigame/minigame.db".into();

        let state = AppState::new(config).await;
        assert!(matches!(
            state,
            Err(AppError::DatabaseError(error::DatabaseError::ConnectionError(_)))
        ));
    }

    #[tokio::test]
    async fn test_app_state_clone() {
        let config = Settings::new_for_test().expect("Failed to load test config");
        let db = DbOperations::in_memory().await.unwrap();
        let state = AppState::with_db(config, db);

        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.auth_service, &cloned.auth_service));
    }
}
