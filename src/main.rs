use lotwise::config::{Config, StoreBackend};
use lotwise::{api, KeyValueStore, MemoryStore, Session, SqliteStore, StoreError};
use std::net::SocketAddr;
use std::sync::Arc;

async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    match (config.store_backend, config.database_path.as_deref()) {
        (StoreBackend::Sqlite, Some(path)) => Ok(Arc::new(SqliteStore::open(path).await?)),
        _ => {
            tracing::warn!("Using in-memory store; entries will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let store = match open_store(&config).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let session = match Session::load(store, config.fees).await {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("Failed to restore calculator state: {}", e);
            std::process::exit(1);
        }
    };

    let app = api::create_router(api::AppState::new(session));

    // Loopback only: this is a single-user local tool.
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Calculator listening on {} (fees {})", addr, config.fees.label());

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
