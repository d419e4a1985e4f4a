//! # CoachBook API
//!
//! The web server for the coach booking service. It exposes JSON endpoints
//! for creating, listing, updating and deleting bookings.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: translate HTTP requests into booking operations
//! - **Middleware**: error-to-response mapping
//! - **Config**: environment configuration
//!
//! The booking store is injected through [`ApiState`], so the same router
//! runs against PostgreSQL in production and an in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{http::HeaderValue, Router};
use coachbook_core::store::BookingStore;
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Booking persistence; the only shared mutable resource
    pub store: Arc<dyn BookingStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }
}

/// Builds the router with every endpoint and request tracing attached.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Booking endpoints
        .merge(routes::booking::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Installs the global tracing subscriber at the configured level.
pub fn init_tracing(config: &config::ApiConfig) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server and serves until Ctrl-C.
///
/// # Arguments
///
/// * `config` - API configuration including host, port and timeouts
/// * `store` - booking persistence used by every handler
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn BookingStore>) -> Result<()> {
    let state = Arc::new(ApiState::new(store));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(allowed)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // A timed-out request drops its future, which rolls back any open
    // booking transaction.
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
