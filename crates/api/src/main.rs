use std::net::SocketAddr;
use std::sync::Arc;

use alazar_db::store::Stores;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alazar_api::config::ServerConfig;
use alazar_api::router::build_app_router;
use alazar_api::state::AppState;
use alazar_api::upload::UploadDir;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "alazar_api=debug,alazar_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Record stores ---
    let stores = match &config.database_url {
        Some(database_url) => {
            let pool = alazar_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            alazar_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Stores::postgres(pool)
        }
        None => {
            tracing::info!(dir = %config.data_dir.display(), "Using JSON file store");
            Stores::json(&config.data_dir)
        }
    };
    stores
        .prepare()
        .await
        .expect("Failed to prepare record store");
    stores
        .health_check()
        .await
        .expect("Record store health check failed");
    tracing::info!(backend = stores.backend_name(), "Record store ready");

    // --- Uploads ---
    let uploads = UploadDir::new(&config.upload_dir);
    uploads
        .ensure_exists()
        .await
        .expect("Failed to create upload directory");
    tracing::info!(dir = %uploads.root().display(), "Upload directory ready");

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState {
        config: Arc::new(config),
        stores,
        uploads: Arc::new(uploads),
    };

    let app = build_app_router(state);

    // --- Start server ---
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
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
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
