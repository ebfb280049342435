use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elio::api::{create_router, AppState};
use elio::config::Config;
use elio::db::{connect_backend, InventoryBackend};
use elio::vision::{ImageAnnotator, VisionProvider};

#[derive(Parser)]
#[command(name = "elio")]
#[command(about = "Medical-supply label recognition API")]
struct Args {
    /// Address to bind, overrides ELIO_HOST
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elio=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.server.api_keys.is_empty() {
        tracing::warn!("ELIO_API_KEYS is not set, all routes are open");
    }

    tracing::info!("Initializing Google Vision client...");
    let vision = VisionProvider::new(&config.vision);
    if !vision.is_available() {
        tracing::warn!("Vision unavailable - analyze endpoints will return 501");
    }
    let annotator: Arc<dyn ImageAnnotator> = Arc::new(vision);

    let store: Option<Arc<dyn InventoryBackend>> = match &config.database {
        None => {
            tracing::warn!("No database configured - scans will not be saved");
            None
        }
        Some(db_config) => {
            tracing::info!("Initializing {:?} database...", db_config.kind);
            match connect_backend(db_config).await {
                Ok(store) => Some(store),
                Err(e) => {
                    tracing::warn!(
                        "Failed to initialize database: {} - continuing without persistence",
                        e
                    );
                    None
                }
            }
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, annotator, store);
    let app = create_router(state);

    tracing::info!("Elio starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
