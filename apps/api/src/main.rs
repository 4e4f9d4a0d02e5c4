//! Hauskern Property Portfolio API
//!
//! HTTP service for managing property → building → unit hierarchies backed
//! by PostgreSQL, with snapshot reconciliation on every write.

mod config;
mod health;
mod logging;

use axum::{routing::get, Extension, Router};
use config::Config;
use hauskern_api_properties::{properties_router, ExtractionService, PropertiesState};
use hauskern_db::{run_migrations, DbPool};
use health::{health_handler, readyz_handler};
use logging::init_logging;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.log_filter);

    let pool = match DbPool::connect_with_max(&config.database_url, config.max_connections).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let extraction_service =
        ExtractionService::new(config.openai_api_key.clone(), config.openai_base_url.clone());
    if !extraction_service.is_configured() {
        tracing::warn!("OPENAI_API_KEY not set; document extraction endpoint will answer 503");
    }

    let state = PropertiesState::new(pool.inner().clone(), extraction_service);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(health_handler))
        .route("/readyz", get(readyz_handler))
        .nest("/properties", properties_router(state))
        .layer(Extension(pool.inner().clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "Starting hauskern API");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
