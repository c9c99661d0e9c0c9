use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of `cgt_players`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub created_dtm: Option<DateTime<Utc>>,
    pub is_confirmed: bool,
}

impl Player {
    /// An unconfirmed account holding an already hashed password.
    pub fn new(id: String, password_hash: String, email: String) -> Self {
        Self {
            id,
            password: password_hash,
            email,
            created_dtm: None,
            is_confirmed: false,
        }
    }
}

/// A row of `cgt_player_best`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlayerBest {
    pub id: i64,
    pub player_id: String,
    pub best_score: i64,
    pub best_stage: i64,
    pub best_score_date: Option<NaiveDate>,
}

/// A row of `cgt_player_static`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlayerStatic {
    pub id: i64,
    pub player_id: String,
    pub total_exp: i64,
    pub total_level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserScore {
    pub best_score: i64,
    pub best_stage: i64,
    pub best_score_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRank {
    pub ranking: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: i64,
    #[serde(rename = "playerID")]
    pub player_id: String,
    pub best_score: i64,
    pub best_stage: i64,
    pub best_score_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LevelExp {
    #[serde(rename = "totalGetExp")]
    pub total_exp: i64,
    pub total_level: i64,
}

/// Everything the profile page shows, joined from all three tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    #[serde(rename = "playerEmail")]
    pub email: String,
    #[serde(rename = "playerJoinDate")]
    pub created_dtm: Option<DateTime<Utc>>,
    pub best_score: i64,
    pub best_stage: i64,
    #[serde(rename = "totalGetExp")]
    pub total_exp: i64,
    pub total_level: i64,
}
