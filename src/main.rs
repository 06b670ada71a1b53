//! ChainWatch Backend Server
//!
//! Rust backend for the ChainWatch dashboard, providing wallet risk
//! scoring, screening, alert rules, and real-time alert delivery.

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use chainwatch_server::anomaly::ActivityHeuristic;
use chainwatch_server::config::Config;
use chainwatch_server::middleware::{self, RateLimiter};
use chainwatch_server::routes;
use chainwatch_server::rules::{AlertLog, AlertService, MemoryRuleStore};
use chainwatch_server::screener::{MemoryWalletStore, ScreenerService};
use chainwatch_server::state::AppState;
use chainwatch_server::websocket::WsState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    tracing::info!(environment = %config.environment.as_str(), "Starting ChainWatch server");

    // Initialize WebSocket state
    let ws_state = WsState::new();

    // Initialize services over in-memory stores
    let alert_service = Arc::new(AlertService::new(
        Arc::new(MemoryRuleStore::new()),
        AlertLog::new(config.alert_backlog),
        ws_state.clone(),
    ));

    let screener_service = Arc::new(ScreenerService::new(
        Arc::new(MemoryWalletStore::new()),
        Arc::new(ActivityHeuristic),
        alert_service.clone(),
        ws_state.clone(),
        config.whale_min_balance,
    ));

    let config = Arc::new(config);

    // Create shared app state
    let app_state = AppState::new(
        screener_service.clone(),
        alert_service.clone(),
        ws_state.clone(),
        config.clone(),
    );

    // Start the background risk sweep
    let sweep_screener = screener_service.clone();
    let sweep_period = config.sweep_interval();
    tokio::spawn(async move {
        tracing::info!(period_secs = sweep_period.as_secs(), "Risk sweep task started");
        sweep_screener.sweep_loop(sweep_period).await;
        tracing::error!("Risk sweep task exited unexpectedly");
    });

    // Initialize rate limiter
    let rate_limiter = RateLimiter::new(config.rate_limit_rps);

    // Periodically drop idle rate limiter buckets
    let janitor = rate_limiter.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(300));
        loop {
            ticker.tick().await;
            janitor.cleanup(Duration::from_secs(600)).await;
        }
    });

    // Create the app router
    let app = routes::app_router()
        .with_state(app_state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(axum::middleware::from_fn(move |req, next| {
            let limiter = rate_limiter.clone();
            middleware::rate_limit_layer(limiter)(req, next)
        }))
        .layer(configure_cors(&config));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket available at ws://{}/ws", addr);
    tracing::info!("Health check at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn configure_cors(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();

    if origins.is_empty() {
        if config.environment.is_production() {
            tracing::warn!("CORS_ALLOWED_ORIGINS not set in production, allowing all origins");
        } else {
            tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        }
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
