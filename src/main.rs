mod bot;
mod config;
mod controller;
mod data;
mod dto;
mod error;
mod middleware;
mod model;
mod router;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    error::AppError,
    scheduler::live_watch,
    service::{
        notification::{discord::DiscordNotificationSink, NotificationSink},
        watcher::{cache::DbLiveStateCache, source::DbWatchConfigSource, LiveStatusPoller},
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,streamwatch=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let probers = startup::build_probers(&config, http_client)?;

    tracing::info!("Starting streamwatch");

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) = bot::start::init_bot(&config, db.clone()).await?;

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let sink: Arc<dyn NotificationSink> = Arc::new(DiscordNotificationSink::new(
        discord_http,
        config.mention_everyone,
    ));

    let settings = startup::watcher_settings(&config)?;
    let mut poller = LiveStatusPoller::new(
        Arc::new(DbWatchConfigSource::new(db.clone())),
        probers.clone(),
        sink.clone(),
        settings,
    );
    if config.persist_live_state {
        poller = poller.with_cache(Arc::new(DbLiveStateCache::new(db.clone())));
        poller.restore_from_cache().await;
    }
    let live_states = poller.published_states();
    let poller = Arc::new(Mutex::new(poller));

    let watcher = live_watch::start_scheduler(poller, config.poll_interval).await?;

    let app = router::router()
        .with_state(AppState::new(
            db,
            config.admin_token.clone(),
            probers,
            sink,
            settings.probe_timeout,
            live_states,
        ))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Admin API listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    watcher.stop().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
