//! Database module for the minigame service
//!
//! Connection handling, schema creation and every query the web layer
//! issues against the player tables.

pub mod accounts;
pub mod models;
pub mod operations;
pub mod schema;
pub mod scores;
pub mod stats;

pub use models::{LeaderboardEntry, LevelExp, Player, PlayerBest, PlayerStatic, ProfileInfo, UserRank, UserScore};
pub use operations::{DbOperations, DbPoolStatus};
pub use scores::LEADERBOARD_SIZE;
