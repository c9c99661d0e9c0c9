mod common;

use chrono::NaiveDate;
use common::{confirmed_player, player_with_score, setup_test_db};

#[test_log::test(tokio::test)]
async fn test_update_then_fetch_score() {
    let db = setup_test_db().await;
    confirmed_player(&db, "alice", "pw").await;

    let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    db.record_best_score("alice", 1500, 4, date).await.unwrap();

    let score = db.get_user_score("alice").await.unwrap().unwrap();
    assert_eq!(score.best_score, 1500);
    assert_eq!(score.best_stage, 4);
    assert_eq!(score.best_score_date, Some(date));

    db.update_user_score("alice", 1800, 5).await.unwrap();
    let score = db.get_user_score("alice").await.unwrap().unwrap();
    assert_eq!((score.best_score, score.best_stage), (1800, 5));
    assert!(score.best_score_date.is_some());
}

#[test_log::test(tokio::test)]
async fn test_percentile_extremes() {
    let db = setup_test_db().await;
    for (player, score) in [("a", 400), ("b", 300), ("c", 200), ("d", 100)] {
        player_with_score(&db, player, score).await;
    }

    assert_eq!(db.get_user_percent("a").await.unwrap(), Some(100.0));
    assert_eq!(db.get_user_percent("b").await.unwrap(), Some(75.0));
    assert_eq!(db.get_user_percent("d").await.unwrap(), Some(100.0 / 4.0));
    assert_eq!(db.get_user_percent("nobody").await.unwrap(), None);
}

#[test_log::test(tokio::test)]
async fn test_rank_with_ties() {
    let db = setup_test_db().await;
    for (player, score) in [("a", 900), ("b", 700), ("c", 700), ("d", 100)] {
        player_with_score(&db, player, score).await;
    }

    let rank = |player: &'static str| {
        let db = db.clone();
        async move { db.get_user_rank(player).await.unwrap().unwrap().ranking }
    };

    assert_eq!(rank("a").await, 1);
    assert_eq!(rank("b").await, 2);
    assert_eq!(rank("c").await, 2);
    assert_eq!(rank("d").await, 4);
    assert!(db.get_user_rank("nobody").await.unwrap().is_none());
}

#[test_log::test(tokio::test)]
async fn test_leaderboard_top_ten() {
    let db = setup_test_db().await;
    // Twelve players; two pairs share a score.
    let scores = [
        1200, 1100, 1100, 1000, 900, 800, 700, 600, 600, 500, 400, 300,
    ];
    for (i, score) in scores.iter().enumerate() {
        player_with_score(&db, &format!("player{i:02}"), *score).await;
    }

    let leaderboard = db.get_leaderboard().await.unwrap();
    assert_eq!(leaderboard.len(), 10);

    for pair in leaderboard.windows(2) {
        assert!(pair[0].best_score >= pair[1].best_score);
        assert!(pair[0].rank <= pair[1].rank);
    }

    let ranks: Vec<i64> = leaderboard.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 2, 4, 5, 6, 7, 8, 8, 10]);

    assert_eq!(leaderboard[0].player_id, "player00");
    assert_eq!(leaderboard[0].best_score, 1200);
    assert_eq!(leaderboard[0].best_stage, 12);
    assert!(leaderboard.iter().all(|e| e.best_score_date.is_some()));
    assert!(leaderboard.iter().all(|e| e.best_score >= 500));
}
