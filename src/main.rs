use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookbuddy::infrastructure::AppState;
use bookbuddy::models::Catalog;
use bookbuddy::services::catalog_service;
use bookbuddy::{config, server};

#[tokio::main]
async fn main() {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookbuddy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = config::Config::from_env();

    // Check for --catalog CLI argument
    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--catalog") {
        if let Some(val) = args.get(pos + 1) {
            config.catalog_path = PathBuf::from(val);
        }
    }

    // Load the catalog once; an unreadable source leaves it empty
    let catalog = match catalog_service::load_catalog(&config.catalog_path) {
        Ok(catalog) => {
            tracing::info!(
                "Loaded {} books from {}",
                catalog.len(),
                config.catalog_path.display()
            );
            catalog
        }
        Err(e) => {
            tracing::error!("Failed to load catalog: {} (starting with an empty catalog)", e);
            Catalog::empty()
        }
    };

    let preferred_port = config.port;
    let state = AppState::new(config, catalog);
    let app = server::build_router(state);

    // Find available port
    let Some(port) = server::find_available_port(preferred_port) else {
        tracing::error!("Failed to find an available port near {}", preferred_port);
        std::process::exit(1);
    };

    if port != preferred_port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            preferred_port,
            port
        );
    }

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Book Buddy server listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
