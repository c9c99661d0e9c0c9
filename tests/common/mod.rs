#![allow(dead_code)]

use minigame_data::DbOperations;

/// Fresh in-memory database with a fast bcrypt cost.
pub async fn setup_test_db() -> DbOperations {
    DbOperations::in_memory()
        .await
        .expect("Failed to open in-memory database")
        .with_bcrypt_cost(4)
}

/// Register and confirm an account in one go.
pub async fn confirmed_player(db: &DbOperations, player_id: &str, password: &str) {
    let email = format!("{player_id}@example.com");
    db.account_register(player_id, password, &email)
        .await
        .expect("Failed to register");
    db.account_confirm(&email).await.expect("Failed to confirm");
}

/// Confirmed player holding the given best score.
pub async fn player_with_score(db: &DbOperations, player_id: &str, score: i64) {
    confirmed_player(db, player_id, "pw").await;
    db.update_user_score(player_id, score, score / 100)
        .await
        .expect("Failed to update score");
}
