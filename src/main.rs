//! Circulade Server - Library Circulation Oversight Service
//!
//! REST API for overdue reporting and borrower sanction management.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circulade_server::{
    api,
    config::AppConfig,
    services::Services,
    source::BackendClient,
    store::RedisSanctionStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!("circulade_server={},tower_http=debug", config.logging.level).into()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Circulade Server v{}", env!("CARGO_PKG_VERSION"));

    // Connect to the sanction store
    let store = RedisSanctionStore::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis sanction store");

    tracing::info!("Connected to sanction store");

    // Build the loan source client
    let backend = BackendClient::new(&config.backend)
        .expect("Failed to build backend client");

    tracing::info!("Loan source: {}", config.backend.base_url);

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services
    let services = Services::new(Arc::new(backend), Arc::new(store));

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Overdue reporting
        .route("/overdues", get(api::overdues::list_overdues))
        // Sanctions
        .route("/sanctions", get(api::sanctions::list_sanctions))
        .route("/sanctions", post(api::sanctions::apply_sanction))
        .route("/sanctions", delete(api::sanctions::clear_sanctions))
        .route("/sanctions/:user_id", delete(api::sanctions::remove_sanction))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
