//! Account lifecycle: registration, login, confirmation and password changes.

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::LoginStatus;
use crate::db::models::Player;
use crate::db::operations::DbOperations;
use crate::error::AppError;
use crate::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

impl DbOperations {
    pub async fn find_player(&self, player_id: &str) -> Result<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            "SELECT id, password, email, created_dtm, is_confirmed FROM cgt_players WHERE id = ?1",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    pub async fn find_player_by_email(&self, email: &str) -> Result<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            "SELECT id, password, email, created_dtm, is_confirmed FROM cgt_players WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    pub async fn account_exists(&self, player_id: &str) -> Result<bool> {
        Ok(self.find_player(player_id).await?.is_some())
    }

    /// Check credentials. Expected failures come back as a status, never as
    /// an error; the confirmation gate is checked before the password.
    pub async fn account_login(&self, player_id: &str, password: &str) -> Result<(bool, LoginStatus)> {
        let status = match self.find_player(player_id).await? {
            None => LoginStatus::NotFound,
            Some(player) if !player.is_confirmed => LoginStatus::NotConfirmed,
            Some(player) => {
                if verify_password_blocking(password, &player.password).await? {
                    LoginStatus::Success
                } else {
                    LoginStatus::WrongPassword
                }
            }
        };

        debug!("Login attempt for {}: {}", player_id, status);
        Ok((status.is_success(), status))
    }

    /// Insert a new, unconfirmed account. The password is hashed before it
    /// touches the database.
    pub async fn account_register(&self, player_id: &str, password: &str, email: &str) -> Result<()> {
        if player_id.trim().is_empty() {
            return Err(AppError::ValidationError("player id must not be empty".into()));
        }
        if email.trim().is_empty() {
            return Err(AppError::ValidationError("email must not be empty".into()));
        }

        let player = Player::new(
            player_id.to_string(),
            hash_password_blocking(password, self.bcrypt_cost).await?,
            email.to_string(),
        );

        sqlx::query(
            "INSERT INTO cgt_players (id, password, email, created_dtm, is_confirmed)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&player.id)
        .bind(&player.password)
        .bind(&player.email)
        .bind(player.created_dtm)
        .bind(player.is_confirmed)
        .execute(&self.pool)
        .await?;

        info!("Registered account {}", player.id);
        Ok(())
    }

    pub async fn account_is_confirmed(&self, email: &str) -> Result<bool> {
        Ok(self
            .find_player_by_email(email)
            .await?
            .map(|player| player.is_confirmed)
            .unwrap_or(false))
    }

    /// Activate the account behind `email`, stamp its join date and create
    /// its best-score and statistics rows.
    pub async fn account_confirm(&self, email: &str) -> Result<()> {
        self.account_confirm_at(email, Utc::now()).await?;
        Ok(())
    }

    /// Confirmation with an explicit join timestamp. Returns false when no
    /// unconfirmed account has that e-mail.
    pub async fn account_confirm_at(&self, email: &str, confirmed_at: DateTime<Utc>) -> Result<bool> {
        let mut transaction = self.begin_transaction().await?;

        let result = Self::confirm_in_transaction(email, confirmed_at, &mut transaction).await;

        match result {
            Ok(Some(player_id)) => {
                transaction.commit().await?;
                info!("Confirmed account {}", player_id);
                Ok(true)
            }
            Ok(None) => {
                transaction.rollback().await?;
                debug!("No unconfirmed account for {}", email);
                Ok(false)
            }
            Err(e) => {
                transaction.rollback().await?;
                Err(e)
            }
        }
    }

    async fn confirm_in_transaction(
        email: &str,
        confirmed_at: DateTime<Utc>,
        transaction: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    ) -> Result<Option<String>> {
        // Only an unconfirmed account flips, so the dependent rows are
        // created exactly once.
        let player_id: Option<(String,)> = sqlx::query_as(
            "UPDATE cgt_players SET is_confirmed = 1, created_dtm = ?1
             WHERE email = ?2 AND is_confirmed = 0
             RETURNING id",
        )
        .bind(confirmed_at)
        .bind(email)
        .fetch_optional(&mut **transaction)
        .await?;

        let Some((player_id,)) = player_id else {
            return Ok(None);
        };

        sqlx::query("INSERT INTO cgt_player_static (player_id) VALUES (?1)")
            .bind(&player_id)
            .execute(&mut **transaction)
            .await?;

        sqlx::query("INSERT INTO cgt_player_best (player_id) VALUES (?1)")
            .bind(&player_id)
            .execute(&mut **transaction)
            .await?;

        Ok(Some(player_id))
    }

    pub async fn account_change_password(&self, player_id: &str, password: &str) -> Result<()> {
        let hash = hash_password_blocking(password, self.bcrypt_cost).await?;

        let result = sqlx::query("UPDATE cgt_players SET password = ?1 WHERE id = ?2")
            .bind(&hash)
            .bind(player_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!("Password change for unknown account {}", player_id);
        } else {
            info!("Changed password for {}", player_id);
        }
        Ok(())
    }
}
