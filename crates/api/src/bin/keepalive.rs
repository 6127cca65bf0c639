//! Periodic database ping that keeps a hosted database tier from idling out.

use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glaze_api::config::KeepaliveConfig;
use glaze_api::shutdown::shutdown_signal;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glaze_keepalive=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = KeepaliveConfig::from_env();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        tracing::error!("DATABASE_URL must be set");
        return ExitCode::FAILURE;
    };

    let pool = match glaze_db::create_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return ExitCode::FAILURE;
        }
    };

    if config.once {
        return match glaze_db::health_check(&pool).await {
            Ok(()) => {
                tracing::info!("Database ping succeeded");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "Database ping failed");
                ExitCode::FAILURE
            }
        };
    }

    tracing::info!(interval_secs = config.interval_secs, "Keep-alive started");
    let mut ticker = tokio::time::interval(Duration::from_secs(config.interval_secs));
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match glaze_db::health_check(&pool).await {
                    Ok(()) => tracing::info!("Database ping succeeded"),
                    // Keep looping; the next tick may succeed.
                    Err(e) => tracing::warn!(error = %e, "Database ping failed"),
                }
            }
            () = &mut shutdown => break,
        }
    }

    pool.close().await;
    tracing::info!("Keep-alive stopped");
    ExitCode::SUCCESS
}
