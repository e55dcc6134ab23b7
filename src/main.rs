//! Menu Bot - conversational food-ordering frontend.
//!
//! Receives chat platform updates on a webhook, drives each user's ordering
//! dialogue and replies through the Bot API.
//!
//! # Wiring
//!
//! - PostgreSQL for customers, addresses, delivery zones and bot settings
//! - Redis (or PostgreSQL) for per-user dialogue state
//! - Nominatim for reverse geocoding shared locations

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use menu_bot::adapters::geocoding::NominatimGeocoder;
use menu_bot::adapters::http::{webhook_router, WebhookState};
use menu_bot::adapters::postgres::{
    PostgresAddressRepository, PostgresCustomerRepository, PostgresDeliveryZoneReader,
    PostgresTextResolver,
};
use menu_bot::adapters::storage::{PostgresDialogueStore, RedisDialogueStore};
use menu_bot::adapters::telegram::{TelegramClient, TelegramNotifier};
use menu_bot::application::{DialogueCollaborators, DialogueEngine};
use menu_bot::config::{AppConfig, StateBackend};
use menu_bot::ports::DialogueStateStore;

/// Bound on a single Bot API call.
const TELEGRAM_TIMEOUT: Duration = Duration::from_secs(10);

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    // Relational store
    let pool = config.database.pool_options().connect(&config.database.url).await?;
    tracing::info!("Database pool created");
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    // Dialogue state
    let state_store: Arc<dyn DialogueStateStore> = match config.bot.state_backend {
        StateBackend::Redis => Arc::new(
            RedisDialogueStore::connect(&config.redis.url, config.redis.key_prefix.clone(), config.redis.timeout())
                .await?,
        ),
        StateBackend::Postgres => Arc::new(PostgresDialogueStore::new(pool.clone())),
    };
    tracing::info!(backend = ?config.bot.state_backend, "Dialogue state store ready");

    // Texts and switches
    let texts = PostgresTextResolver::new(pool.clone());
    let keys = texts.refresh().await?;
    tracing::info!(keys, "Bot settings loaded");
    let refresh_task = texts.spawn_refresh(config.bot.settings_refresh());

    // Outbound
    let telegram = Arc::new(TelegramClient::new(
        config.bot.api_base_url.clone(),
        config.bot.token.clone(),
        TELEGRAM_TIMEOUT,
    )?);
    let notifier = Arc::new(TelegramNotifier::new(Arc::clone(&telegram)));
    let geocoder = Arc::new(NominatimGeocoder::new(&config.geocoder)?);

    let engine = DialogueEngine::new(DialogueCollaborators {
        state_store: Arc::clone(&state_store),
        customers: Arc::new(PostgresCustomerRepository::new(pool.clone())),
        addresses: Arc::new(PostgresAddressRepository::new(pool.clone())),
        zones: Arc::new(PostgresDeliveryZoneReader::new(pool.clone())),
        texts: Arc::new(texts),
        geocoder,
        notifier: notifier.clone(),
    })
    .with_geocode_timeout(config.geocoder.timeout());

    // Webhook registration
    if let Some(endpoint) = config.bot.webhook_endpoint() {
        let secret = config.bot.webhook_secret.as_ref().map(|s| s.expose_secret().as_str());
        telegram.set_webhook(&endpoint, secret).await?;
        tracing::info!(endpoint = %endpoint, "Webhook registered");
    } else {
        tracing::warn!("No webhook URL configured; expecting updates to be routed externally");
    }

    let mut webhook_state = WebhookState::new(Arc::new(engine), notifier);
    if let Some(secret) = config.bot.webhook_secret.clone() {
        webhook_state = webhook_state.with_secret(secret);
    }
    let app = webhook_router(webhook_state, &config.bot.webhook_path, config.server.request_timeout());

    // Serve
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, path = %config.bot.webhook_path, "menu-bot listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh_task.abort();
    if let Err(e) = state_store.close().await {
        tracing::warn!(error = %e, "Dialogue state store did not close cleanly");
    }
    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// JSON logs in production, human-readable otherwise; `RUST_LOG` overrides the configured level.
fn init_tracing(config: &AppConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
