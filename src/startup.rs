use std::sync::Arc;

use crate::{
    config::Config,
    error::{config::ConfigError, AppError},
    model::{live::ReNotifyPolicy, platform::Platform},
    service::{
        prober::{
            browser::BrowserSession, fallback::FallbackProber, kick_api::KickApiProber,
            kick_page::KickPageProber, registry::ProberRegistry, twitch::TwitchProber, Prober,
        },
        watcher::WatcherSettings,
    },
};

/// Connects to the database and runs pending migrations.
///
/// SQL statement logging is disabled.
///
/// # Arguments
/// - `config` - Application configuration holding `DATABASE_URL`
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Migrated connection pool
/// - `Err(AppError::DbErr)` - Connection or migration failed
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client shared by the platform probers.
///
/// Redirects are not followed; a redirect from a platform API is treated as an
/// unexpected status.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Registers a prober for every platform the configuration enables.
///
/// - Twitch: Helix API, only when both Twitch credentials are set
/// - Kick: channel API, falling back to the headless browser when `BROWSER_ENABLED`
///
/// # Returns
/// - `Ok(ProberRegistry)` - Registry for the poller and the test endpoint
/// - `Err(AppError::ProbeErr)` - Configured Twitch auth URL is invalid
pub fn build_probers(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<ProberRegistry, AppError> {
    let mut registry = ProberRegistry::new();

    match &config.twitch {
        Some(credentials) => {
            let twitch = TwitchProber::new(
                http_client.clone(),
                credentials,
                &config.twitch_auth_url,
                &config.twitch_api_url,
            )?;
            registry = registry.with(Platform::Twitch, Arc::new(twitch));
        }
        None => tracing::warn!("Twitch credentials not set; Twitch channels will not be probed"),
    }

    let kick_api: Arc<dyn Prober> = Arc::new(KickApiProber::new(http_client, &config.kick_url));

    let kick: Arc<dyn Prober> = if config.browser.enabled {
        let session = Arc::new(BrowserSession::new(config.browser.clone()));
        let kick_page: Arc<dyn Prober> = Arc::new(KickPageProber::new(
            session,
            &config.kick_url,
            config.browser.max_attempts,
            config.browser.backoff,
        ));

        tracing::info!("Kick probes fall back to the headless browser");
        Arc::new(FallbackProber::new(Platform::Kick, vec![kick_api, kick_page]))
    } else {
        kick_api
    };
    registry = registry.with(Platform::Kick, kick);

    tracing::info!("Probing platforms: {:?}", registry.platforms());

    Ok(registry)
}

/// Poller tuning taken from the configuration.
///
/// # Returns
/// - `Ok(WatcherSettings)` - Settings for the poller
/// - `Err(AppError::ConfigErr)` - `RENOTIFY_COOLDOWN_SECS` is out of range
pub fn watcher_settings(config: &Config) -> Result<WatcherSettings, AppError> {
    let renotify = match config.renotify_cooldown {
        Some(cooldown) => {
            let cooldown = chrono::Duration::from_std(cooldown).map_err(|e| {
                ConfigError::InvalidEnvVar {
                    name: "RENOTIFY_COOLDOWN_SECS".to_string(),
                    reason: e.to_string(),
                }
            })?;
            ReNotifyPolicy::after(cooldown)
        }
        None => ReNotifyPolicy::never(),
    };

    Ok(WatcherSettings {
        probe_timeout: config.probe_timeout,
        probe_concurrency: config.probe_concurrency,
        renotify,
    })
}
