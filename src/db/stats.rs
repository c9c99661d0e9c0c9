//! Experience, level and the joined profile view.

use crate::db::models::{LevelExp, ProfileInfo};
use crate::db::operations::DbOperations;
use crate::Result;
use tracing::warn;

impl DbOperations {
    pub async fn get_user_level_exp(&self, player_id: &str) -> Result<Option<LevelExp>> {
        let stats = sqlx::query_as::<_, LevelExp>(
            "SELECT total_exp, total_level FROM cgt_player_static WHERE player_id = ?1",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Overwrite cumulative experience and level.
    pub async fn set_user_level_exp(&self, player_id: &str, exp: i64, level: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE cgt_player_static SET total_exp = ?1, total_level = ?2 WHERE player_id = ?3",
        )
        .bind(exp)
        .bind(level)
        .bind(player_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!("No statistics record for {}", player_id);
        }
        Ok(())
    }

    pub async fn user_profile_info(&self, player_id: &str) -> Result<Option<ProfileInfo>> {
        let profile = sqlx::query_as::<_, ProfileInfo>(
            "SELECT p.email, p.created_dtm, b.best_score, b.best_stage, s.total_exp, s.total_level
             FROM cgt_players p
             JOIN cgt_player_best b ON p.id = b.player_id
             JOIN cgt_player_static s ON p.id = s.player_id
             WHERE p.id = ?1",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
