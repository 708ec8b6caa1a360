mod config;
mod crm;
mod db;
mod errors;
mod handlers;
mod models;
mod notifications;
mod premium;
mod risk;
mod risk_client;
mod routing;
mod scoring;
mod storage;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::crm::CloseCrmClient;
use crate::db::Database;
use crate::risk_client::RiskScoringClient;
use crate::routing::SalesTeam;

/// Main entry point for the application.
///
/// Initializes tracing, configuration, the database pool, the external
/// clients, and the HTTP routes with their middleware stack, then serves.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotecyber_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    // AI risk scoring client (optional; fallback model covers its absence)
    let risk_client = match &config.anthropic_api_key {
        Some(key) => match RiskScoringClient::new(
            config.anthropic_base_url.clone(),
            key.clone(),
            config.anthropic_model.clone(),
        ) {
            Ok(client) => {
                tracing::info!("AI risk scoring client initialized");
                Some(client)
            }
            Err(e) => {
                tracing::error!("Failed to initialize risk scoring client: {}", e);
                None
            }
        },
        None => None,
    };

    // Close CRM client (optional; sync is skipped without it)
    let crm_client = match &config.close_api_key {
        Some(key) => match CloseCrmClient::new(key.clone()) {
            Ok(client) => {
                tracing::info!("Close CRM client initialized");
                Some(client)
            }
            Err(e) => {
                tracing::error!("Failed to initialize Close CRM client: {}", e);
                None
            }
        },
        None => None,
    };

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        db: db.pool.clone(),
        config: config.clone(),
        risk_client,
        crm_client,
        team: SalesTeam::standard(),
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected API routes with security layers
    let protected_routes = Router::new()
        .route("/api/v1/assessments", post(handlers::submit_assessment))
        .route("/api/v1/assessments/:id", get(handlers::get_assessment))
        .route("/api/v1/admin/leads", get(handlers::admin_list_leads))
        .route(
            "/api/v1/admin/leads/:id/status",
            patch(handlers::admin_update_status),
        )
        .layer(
            ServiceBuilder::new()
                // Request size limit: 5MB max payload
                .layer(RequestBodyLimitLayer::new(5 * 1024 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Health check bypasses rate limiting
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
