use intake_tracker::{AppState, Clock, Repository, router, spawn_remote_watch, sync_poll_interval};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let storage = Repository::from_env()?;
    if let Some(parent) = storage.path().parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = storage.load().await;
    info!(
        entries = data.entries.len(),
        synced = storage.is_synced(),
        "loaded user data"
    );

    let state = AppState::new(storage.clone(), Clock::from_env(), data);
    if storage.is_synced() {
        spawn_remote_watch(state.clone(), sync_poll_interval());
    }

    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
