//! Podium HTTP Server
//!
//! Main entry point for the tenant-resolution API server.

use std::{sync::Arc, time::Duration};

use application::{TenantResolver, ports::TenantDirectory};
use infrastructure::{
    AppConfig, CachedTenantDirectory, Environment, ScopedHandleCache, SqliteHandleFactory,
    SqliteTenantDirectory, create_pool, persistence::run_migrations,
};
use presentation_http::{error::set_expose_internal_errors, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podium_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Podium v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        base_domain = %config.tenancy.base_domain,
        environment = %config.environment,
        "Configuration loaded"
    );

    if config.environment == Environment::Production {
        set_expose_internal_errors(false);
    }

    // Control-plane database
    let pool = create_pool(
        &config.database.control_db_path(),
        config.database.max_connections,
    )?;
    if config.database.run_migrations {
        run_migrations(&pool.get()?)?;
    }
    let pool = Arc::new(pool);

    // Directory: raw store + TTL cache decorator
    let store = SqliteTenantDirectory::new(Arc::clone(&pool));
    let directory = Arc::new(CachedTenantDirectory::new(
        store.clone(),
        &config.directory_cache,
    ));

    // Resolver reads through the cache; the handle cache re-validates
    // against the raw store.
    let resolver = Arc::new(TenantResolver::new(
        Arc::clone(&directory) as Arc<dyn TenantDirectory>,
        config.tenancy.clone(),
    ));
    let handles = Arc::new(ScopedHandleCache::new(
        Arc::new(SqliteHandleFactory::new(config.database.clone())),
        Arc::new(store.clone()) as Arc<dyn TenantDirectory>,
    ));

    let state = AppState {
        resolver,
        directory,
        store,
        handles: Arc::clone(&handles),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout =
        Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    // Dispose every cached data handle before exiting
    handles.shutdown().await;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
