use anyhow::Context;
use dotenv::dotenv;
use minigame_data::{AppState, Settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prepares the minigame database: loads settings, connects, applies the
/// schema and reports the current leaderboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    // Load configuration
    let config = Settings::new().context("failed to load configuration")?;
    info!(
        "Configuration loaded ({} mode, debug: {})",
        config.environment,
        config.is_debug()
    );
    if config.mail.server.is_none() {
        info!("MAIL_SERVER is not set; confirmation mails cannot be sent");
    }

    let state = AppState::new(config)
        .await
        .context("failed to open the minigame database")?;

    let status = state.db.get_pool_status();
    info!(
        "Database ready ({} connections, {} idle)",
        status.total_connections, status.idle_connections
    );

    let leaderboard = state.db.get_leaderboard().await?;
    info!("Leaderboard has {} entries", leaderboard.len());
    for entry in &leaderboard {
        info!(
            "#{} {} score={} stage={}",
            entry.rank, entry.player_id, entry.best_score, entry.best_stage
        );
    }

    state.shutdown().await?;
    Ok(())
}
