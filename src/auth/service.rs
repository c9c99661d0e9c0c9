use crate::auth::{ConfirmationTokens, LoginStatus};
use crate::db::operations::DbOperations;
use crate::error::DatabaseError;
use crate::Result;
use chrono::Utc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    AlreadyConfirmed,
}

/// Account flows that span the token signer and the database.
#[derive(Clone)]
pub struct AuthService {
    db: DbOperations,
    tokens: ConfirmationTokens,
}

impl AuthService {
    pub fn new(db: DbOperations, tokens: ConfirmationTokens) -> Self {
        Self { db, tokens }
    }

    pub async fn login(&self, player_id: &str, password: &str) -> Result<(bool, LoginStatus)> {
        let (ok, status) = self.db.account_login(player_id, password).await?;
        if ok {
            info!("Login successful for {}", player_id);
        } else {
            warn!("Login failed for {}: {}", player_id, status);
        }
        Ok((ok, status))
    }

    /// Token to mail out for a registered but unconfirmed account.
    pub async fn issue_confirmation(&self, email: &str) -> Result<Option<String>> {
        match self.db.find_player_by_email(email).await? {
            Some(player) if !player.is_confirmed => Ok(Some(self.tokens.generate(email)?)),
            _ => Ok(None),
        }
    }

    pub async fn confirm(&self, token: &str) -> Result<ConfirmOutcome> {
        let email = self.tokens.verify(token)?;

        if self.db.account_confirm_at(&email, Utc::now()).await? {
            return Ok(ConfirmOutcome::Confirmed);
        }

        if self.db.account_is_confirmed(&email).await? {
            info!("Account for {} was already confirmed", email);
            Ok(ConfirmOutcome::AlreadyConfirmed)
        } else {
            warn!("Confirmation token for unknown account {}", email);
            Err(DatabaseError::NotFound.into())
        }
    }
}
