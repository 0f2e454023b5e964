use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use member_search::api::router::build_router;
use member_search::api::state::AppState;
use member_search::config::{AppConfig, StorageBackend};
use member_search::infrastructure::database::{create_pool, run_migrations};
use member_search::infrastructure::repositories::InMemoryStore;
use member_search::infrastructure::seed::seed_sample_data;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "member_search=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(host = %config.host, port = config.port, storage = ?config.storage, "Loaded configuration");

    let state = match config.storage {
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(&config.database_url, config.database_max_connections).await?;
            run_migrations(&pool).await?;
            tracing::info!("Database connected and migrated");

            AppState::postgres(pool, config.page)
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            AppState::in_memory(Arc::new(InMemoryStore::new()), config.page)
        }
    };

    if config.seed_sample_data {
        seed_sample_data(state.members.as_ref(), state.teams.as_ref()).await?;
    }

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
