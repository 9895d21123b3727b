use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use v0mon_api::config::ServerConfig;
use v0mon_api::router::build_app_router;
use v0mon_api::state::AppState;
use v0mon_pipeline::adapters::PgCreatureStore;
use v0mon_pipeline::CreatureOrchestrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "v0mon_api=debug,v0mon_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        public_base_url = %config.public_base_url,
        "Loaded server configuration"
    );
    if config.internal_api_key.is_none() {
        tracing::warn!("INTERNAL_API_KEY is not set; POST /api/generate will be rejected");
    }

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = v0mon_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    v0mon_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    v0mon_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Storage ---
    let storage = v0mon_api::storage::build_storage(&config)
        .await
        .expect("Failed to initialise artwork storage");

    // --- Pipeline ---
    let store = Arc::new(PgCreatureStore::new(pool.clone()));
    let orchestrator = CreatureOrchestrator::from_config(&config.pipeline, store, storage)
        .expect("Failed to build generation pipeline");
    if orchestrator.has_generator() {
        tracing::info!("Generation client configured");
    } else {
        tracing::warn!("GOOGLE_GENAI_API_KEY is not set; only existing creatures can be served");
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        orchestrator: Arc::new(orchestrator),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
