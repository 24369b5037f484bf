//! Turtlesoup Engine - Main entry point.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use turtlesoup_engine::{App, EngineSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from the repo root, if a .env file exists.
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turtlesoup_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Turtlesoup Engine");

    let settings = EngineSettings::from_env();
    tracing::info!(
        mode = ?settings.narrator_mode,
        sweep_interval_secs = settings.sweep_interval_secs,
        "settings loaded"
    );

    let app = Arc::new(App::new(&settings));
    tracing::info!(
        stories = app.stories.len(),
        "engine ready; transport adapters drive the core via turtlesoup-shared commands"
    );

    // Periodic reclamation of inactive rooms.
    let sweeper = app.clone();
    let sweep_interval = Duration::from_secs(settings.sweep_interval_secs);
    let sweep_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            let reclaimed = sweeper.store.sweep_expired().await;
            if reclaimed > 0 {
                tracing::debug!(reclaimed, "sweep finished");
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    sweep_task.abort();

    Ok(())
}
