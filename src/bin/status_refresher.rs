//! Runs the background task status refresher against `PostgreSQL`.
//!
//! Usage:
//!
//! ```text
//! DATABASE_URL=postgres://... status_refresher
//! ```
//!
//! Configuration is read from `FASTCHECK_*` environment variables, optionally
//! loaded from a `.env` file. The worker runs until interrupted with Ctrl-C.

use fastcheck::config::TrackerConfig;
use fastcheck::pool::build_pool;
use fastcheck::review::adapters::notifier::TracingNotifier;
use fastcheck::review::adapters::postgres::PostgresSettingsRepository;
use fastcheck::review::services::ReviewNotificationService;
use fastcheck::task::adapters::postgres::PostgresTaskRepository;
use fastcheck::task::services::TaskStatusService;
use fastcheck::worker::StatusRefresher;
use mockable::DefaultClock;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const POOL_SIZE: u32 = 4;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fastcheck=info,status_refresher=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TrackerConfig::from_env()?;
    let database_url = std::env::var(DATABASE_URL_ENV)
        .map_err(|err| format!("{DATABASE_URL_ENV} must be set: {err}"))?;
    let pool = build_pool(&database_url, POOL_SIZE)?;

    let statuses = TaskStatusService::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    let notifications = ReviewNotificationService::new(
        Arc::new(PostgresSettingsRepository::new(pool)),
        Arc::new(TracingNotifier),
    );
    let refresher = Arc::new(StatusRefresher::new(
        statuses,
        notifications,
        config.refresh_interval,
    ));

    let cancel = CancellationToken::new();
    let worker = {
        let refresher_handle = Arc::clone(&refresher);
        let token = cancel.clone();
        tokio::spawn(async move { refresher_handle.run(token).await })
    };

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    cancel.cancel();
    worker.await?;
    Ok(())
}
