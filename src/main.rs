//! Viewpoint API server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use viewpoint::adapters::auth::{Argon2CredentialHasher, JwtTokenSigner};
use viewpoint::adapters::http::{api_router, with_middleware, Adapters, AppState, SessionSettings};
use viewpoint::adapters::media::LocalMediaStorage;
use viewpoint::adapters::postgres::{
    PostgresContentCatalog, PostgresFollowRepository, PostgresInteractionRepository,
    PostgresPrincipalRepository,
};
use viewpoint::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.server);
    config.validate().context("Invalid configuration")?;

    info!(
        environment = ?config.server.environment,
        "Starting Viewpoint v{}",
        env!("CARGO_PKG_VERSION")
    );

    let pool = config
        .database
        .connect()
        .await
        .context("Failed to connect to PostgreSQL")?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        info!("Database migrations applied");
    }

    let hasher = Argon2CredentialHasher::new(&config.auth.argon2)
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 settings: {}", e))?;

    let adapters = Adapters {
        principals: Arc::new(PostgresPrincipalRepository::new(pool.clone())),
        interactions: Arc::new(PostgresInteractionRepository::new(pool.clone())),
        follows: Arc::new(PostgresFollowRepository::new(pool.clone())),
        catalog: Arc::new(PostgresContentCatalog::new(pool.clone())),
        media: Arc::new(LocalMediaStorage::from_config(&config.media)),
        hasher: Arc::new(hasher),
        signer: Arc::new(JwtTokenSigner::from_config(&config.auth)),
    };
    let settings = SessionSettings::from_config(&config.auth, &config.media);
    let state = AppState::new(adapters, settings);

    let app = with_middleware(api_router(state), &config.server);

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    pool.close().await;
    info!("Viewpoint stopped");
    Ok(())
}

/// JSON output in production, human-readable text otherwise. `RUST_LOG`
/// overrides the configured level.
fn init_logging(server: &ServerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_ansi(true))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
