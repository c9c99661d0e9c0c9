//! Best scores, global rank, percentile and the top-10 leaderboard.

use crate::db::models::{LeaderboardEntry, UserRank, UserScore};
use crate::db::operations::DbOperations;
use crate::Result;
use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

/// Number of entries returned by [`DbOperations::get_leaderboard`].
pub const LEADERBOARD_SIZE: i64 = 10;

impl DbOperations {
    pub async fn get_user_score(&self, player_id: &str) -> Result<Option<UserScore>> {
        let score = sqlx::query_as::<_, UserScore>(
            "SELECT best_score, best_stage, best_score_date FROM cgt_player_best WHERE player_id = ?1",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(score)
    }

    /// Overwrite the player's best record, dated today.
    pub async fn update_user_score(&self, player_id: &str, best_score: i64, best_stage: i64) -> Result<()> {
        self.record_best_score(player_id, best_score, best_stage, Utc::now().date_naive())
            .await
    }

    pub async fn record_best_score(
        &self,
        player_id: &str,
        best_score: i64,
        best_stage: i64,
        date: NaiveDate,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE cgt_player_best SET best_score = ?1, best_stage = ?2, best_score_date = ?3
             WHERE player_id = ?4",
        )
        .bind(best_score)
        .bind(best_stage)
        .bind(date)
        .bind(player_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!("No best record for {}; score {} dropped", player_id, best_score);
        }
        Ok(())
    }

    /// Position among all players by descending best score. Equal scores
    /// share a rank.
    pub async fn get_user_rank(&self, player_id: &str) -> Result<Option<UserRank>> {
        let rank = sqlx::query_as::<_, UserRank>(
            "SELECT ranking FROM (
                 SELECT player_id, RANK() OVER (ORDER BY best_score DESC) AS ranking
                 FROM cgt_player_best
             ) WHERE player_id = ?1",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rank)
    }

    /// Top percentile of the player: `100 - higher / total * 100`, where
    /// `higher` counts strictly better scores. Both counts come from one
    /// statement so they describe the same snapshot.
    pub async fn get_user_percent(&self, player_id: &str) -> Result<Option<f64>> {
        let (total, higher): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(b.player_id), COALESCE(SUM(b.best_score > t.best_score), 0)
             FROM cgt_player_best b,
                  (SELECT best_score FROM cgt_player_best WHERE player_id = ?1) t",
        )
        .bind(player_id)
        .fetch_one(&self.pool)
        .await?;

        // The cross join is empty when the player has no best record.
        if total == 0 {
            return Ok(None);
        }

        let percent = percentile(higher, total);
        debug!("{} is in the top {:.2}%", player_id, percent);
        Ok(Some(percent))
    }

    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT RANK() OVER (ORDER BY best_score DESC) AS rank,
                    player_id, best_score, best_stage, best_score_date
             FROM cgt_player_best
             ORDER BY best_score DESC, player_id
             LIMIT ?1",
        )
        .bind(LEADERBOARD_SIZE)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

fn percentile(higher: i64, total: i64) -> f64 {
    let above = if total > 0 {
        higher as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    100.0 - above
}
